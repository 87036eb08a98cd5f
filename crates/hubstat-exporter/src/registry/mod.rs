//! In-process collaborators for standalone deployments and tests.
//!
//! A host with its own cluster membership or replicated state plugs its own
//! implementations of the `hubstat_core::services` traits in instead.

mod cluster;
mod state;

pub use cluster::StaticCluster;
pub use state::{InMemoryStateRegistries, InMemoryStateRegistry};
