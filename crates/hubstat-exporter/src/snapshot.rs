//! Point-in-time snapshot: live gauges plus drained counters.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use hubstat_core::error::Result;
use hubstat_core::services::{ClusterRegistry, StateRegistryProvider};

use crate::stats::{CounterStore, Counters, DirectionalCounters, ErrorCounters, LoginCounters};

/// Immutable result of one read. Serialized as the HTTP response body.
///
/// Families with nothing recorded serialize as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub cluster_size: usize,
    pub state_metrics: BTreeMap<String, usize>,
    pub errors: ErrorCounters,
    // wire names kept for existing dashboards
    #[serde(rename = "recieved")]
    pub received: DirectionalCounters,
    #[serde(rename = "send")]
    pub sent: DirectionalCounters,
    pub logins: LoginCounters,
}

impl Snapshot {
    fn assemble(cluster_size: usize, state_metrics: BTreeMap<String, usize>, c: Counters) -> Self {
        Self {
            cluster_size,
            state_metrics,
            errors: c.errors,
            received: c.received,
            sent: c.sent,
            logins: c.logins,
        }
    }
}

/// Reads gauges from the collaborators and drains the counter store.
pub struct SnapshotReader {
    store: Arc<CounterStore>,
    cluster: Arc<dyn ClusterRegistry>,
    states: Arc<dyn StateRegistryProvider>,
}

impl SnapshotReader {
    pub fn new(
        store: Arc<CounterStore>,
        cluster: Arc<dyn ClusterRegistry>,
        states: Arc<dyn StateRegistryProvider>,
    ) -> Self {
        Self { store, cluster, states }
    }

    pub fn cluster_size(&self) -> Result<usize> {
        Ok(self.cluster.members()?.len())
    }

    /// registry name -> current number of entries.
    pub fn state_metrics(&self) -> Result<BTreeMap<String, usize>> {
        let mut out = BTreeMap::new();
        for (topic, registry) in self.states.state_registries()? {
            out.insert(topic.name().to_string(), registry.entries()?.len());
        }
        Ok(out)
    }

    /// Gauges are read first: if a collaborator fails, the counters are left
    /// in place for the next read.
    pub fn take_snapshot(&self) -> Result<Snapshot> {
        let cluster_size = self.cluster_size()?;
        let state_metrics = self.state_metrics()?;
        let counters = self.store.take();

        tracing::debug!(
            cluster_size,
            registries = state_metrics.len(),
            drained = counters.total(),
            "monitoring snapshot taken"
        );

        Ok(Snapshot::assemble(cluster_size, state_metrics, counters))
    }
}
