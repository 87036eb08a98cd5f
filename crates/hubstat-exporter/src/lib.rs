//! hubstat exporter library entry.
//!
//! Wires the counter store, snapshot reader, HTTP endpoint, and plugin
//! lifecycle into one component a messaging host embeds. Also consumed by
//! the standalone binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod http;
pub mod logging;
pub mod registry;
pub mod server;
pub mod snapshot;
pub mod stats;

pub use server::{HttpMonitoring, ListenerState, MonitoringServices};
pub use snapshot::{Snapshot, SnapshotReader};
pub use stats::CounterStore;
