//! Collaborator interfaces consumed by the exporter.
//!
//! The exporter only ever reads through these; cluster membership and state
//! registries are owned and mutated by the host.

use std::sync::Arc;

use crate::error::Result;
use crate::protocol::{LogLevel, RegistryTopic};

/// Logging sink.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, event: &str, message: &str);

    fn fatal(&self, event: &str, message: &str) {
        self.log(LogLevel::Fatal, event, message);
    }
}

/// Cluster membership registry.
pub trait ClusterRegistry: Send + Sync {
    /// Names of all currently known servers, this one included.
    fn members(&self) -> Result<Vec<String>>;
}

/// One replicated state registry (e.g. the set of record subscriptions).
pub trait StateRegistry: Send + Sync {
    fn entries(&self) -> Result<Vec<String>>;
}

/// Provider of all state registries known to this server.
pub trait StateRegistryProvider: Send + Sync {
    fn state_registries(&self) -> Result<Vec<(RegistryTopic, Arc<dyn StateRegistry>)>>;
}
