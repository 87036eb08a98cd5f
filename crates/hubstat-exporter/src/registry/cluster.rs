use hubstat_core::error::Result;
use hubstat_core::services::ClusterRegistry;

/// Fixed membership: this server plus a configured peer list.
#[derive(Debug, Clone)]
pub struct StaticCluster {
    members: Vec<String>,
}

impl StaticCluster {
    pub fn new(server_name: impl Into<String>, peers: impl IntoIterator<Item = String>) -> Self {
        let mut members = vec![server_name.into()];
        for p in peers {
            if !members.contains(&p) {
                members.push(p);
            }
        }
        Self { members }
    }

    /// Single-node cluster.
    pub fn single(server_name: impl Into<String>) -> Self {
        Self::new(server_name, std::iter::empty())
    }
}

impl ClusterRegistry for StaticCluster {
    fn members(&self) -> Result<Vec<String>> {
        Ok(self.members.clone())
    }
}
