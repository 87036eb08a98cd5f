//! Shared state handed to the HTTP handlers.

use std::sync::Arc;

use hubstat_core::services::{ClusterRegistry, StateRegistryProvider};

use crate::snapshot::SnapshotReader;
use crate::stats::CounterStore;

#[derive(Clone)]
pub struct AppState {
    reader: Arc<SnapshotReader>,
}

impl AppState {
    pub fn new(
        store: Arc<CounterStore>,
        cluster: Arc<dyn ClusterRegistry>,
        states: Arc<dyn StateRegistryProvider>,
    ) -> Self {
        Self {
            reader: Arc::new(SnapshotReader::new(store, cluster, states)),
        }
    }

    pub fn reader(&self) -> &SnapshotReader {
        &self.reader
    }
}
