//! In-process counters fed by the host's monitoring hooks.
//!
//! Counters only ever grow between two snapshots and are reset wholesale by
//! `CounterStore::take`. Nothing outside this module mutates them.

pub mod counters;
pub mod store;

pub use counters::{Counters, DirectionalCounters, ErrorCounters, LoginCounters, LoginStats};
pub use store::CounterStore;
