use serde::Deserialize;
use hubstat_core::error::{HubStatError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    pub monitoring: MonitoringOptions,

    #[serde(default)]
    pub cluster: ClusterSection,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HubStatError::UnsupportedVersion);
        }

        self.monitoring.validate()?;
        self.cluster.validate()?;

        Ok(())
    }
}

/// HTTP endpoint bind options. Both fields are required.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitoringOptions {
    pub host: String,
    pub port: u16,
}

impl MonitoringOptions {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(HubStatError::BadRequest(
                "monitoring.host must not be empty".into(),
            ));
        }
        if self.port == 0 {
            return Err(HubStatError::BadRequest(
                "monitoring.port must be between 1 and 65535".into(),
            ));
        }
        Ok(())
    }

    /// `host:port`, as used in logs and bind errors.
    pub fn display_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Membership reported by the standalone binary's static cluster registry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterSection {
    #[serde(default = "default_server_name")]
    pub server_name: String,

    #[serde(default)]
    pub peers: Vec<String>,
}

impl Default for ClusterSection {
    fn default() -> Self {
        Self {
            server_name: default_server_name(),
            peers: Vec::new(),
        }
    }
}

impl ClusterSection {
    pub fn validate(&self) -> Result<()> {
        if self.server_name.trim().is_empty() {
            return Err(HubStatError::BadRequest(
                "cluster.server_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_server_name() -> String {
    "hubstat-1".into()
}
