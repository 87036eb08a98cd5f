//! hubstat exporter (standalone)
//!
//! Serves the monitoring snapshot for a single node with static cluster
//! membership and in-process state registries.
//! - Config: first CLI argument, or `hubstat.yaml`
//! - Logs: `RUST_LOG` (default `info`); ERROR events are counted as well

use std::sync::Arc;

use hubstat_core::error::Result;
use hubstat_exporter::{
    config,
    logging::{self, TracingLogger},
    registry::{InMemoryStateRegistries, StaticCluster},
    HttpMonitoring, MonitoringServices,
};

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "hubstat.yaml".to_string());
    let cfg = config::load_from_file(&path)?;

    let services = MonitoringServices {
        logger: Arc::new(TracingLogger::default()),
        cluster: Arc::new(StaticCluster::new(
            cfg.cluster.server_name.clone(),
            cfg.cluster.peers.iter().cloned(),
        )),
        states: Arc::new(InMemoryStateRegistries::new()),
    };
    let mut plugin = HttpMonitoring::new(cfg.monitoring, services);

    logging::init_tracing(Some(plugin.monitoring()))?;

    let addr = plugin.when_ready().await?;
    tracing::info!(%addr, config = %path, "hubstat-exporter started");

    shutdown_signal().await;
    plugin.close().await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
