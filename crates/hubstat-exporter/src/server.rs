//! HTTP monitoring plugin: counter store + endpoint lifecycle.
//!
//! Lifecycle: `Idle -> Listening -> Closed`.
//! - `when_ready` binds and starts serving; bind failure is logged as fatal
//!   through the logger collaborator and returned, never retried.
//! - `close` stops accepting connections and resolves once the server task
//!   has finished (in-flight requests complete first).

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use hubstat_core::error::{HubStatError, Result};
use hubstat_core::protocol::{LogLevel, Message};
use hubstat_core::services::{ClusterRegistry, Logger, StateRegistryProvider};
use hubstat_core::Monitoring;

use crate::app_state::AppState;
use crate::config::MonitoringOptions;
use crate::http;
use crate::stats::CounterStore;

/// Event kind used when the listener cannot be started.
pub const PLUGIN_INITIALIZATION_ERROR: &str = "PLUGIN_INITIALIZATION_ERROR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Idle,
    Listening,
    Closed,
}

/// Collaborators the plugin reads from.
#[derive(Clone)]
pub struct MonitoringServices {
    pub logger: Arc<dyn Logger>,
    pub cluster: Arc<dyn ClusterRegistry>,
    pub states: Arc<dyn StateRegistryProvider>,
}

struct Running {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

pub struct HttpMonitoring {
    options: MonitoringOptions,
    store: Arc<CounterStore>,
    app: AppState,
    logger: Arc<dyn Logger>,
    state: ListenerState,
    running: Option<Running>,
}

impl HttpMonitoring {
    pub fn new(options: MonitoringOptions, services: MonitoringServices) -> Self {
        let store = Arc::new(CounterStore::new());
        let app = AppState::new(Arc::clone(&store), services.cluster, services.states);
        Self {
            options,
            store,
            app,
            logger: services.logger,
            state: ListenerState::Idle,
            running: None,
        }
    }

    pub fn description(&self) -> String {
        format!(
            "HTTP Monitoring on {} Version: {}",
            self.options.display_addr(),
            env!("CARGO_PKG_VERSION")
        )
    }

    /// Handle for the host to call the hooks through.
    pub fn monitoring(&self) -> Arc<dyn Monitoring> {
        self.store.clone()
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    /// Bound address while listening.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.addr)
    }

    /// Bind the configured host/port and start serving.
    pub async fn when_ready(&mut self) -> Result<SocketAddr> {
        if self.state != ListenerState::Idle {
            return Err(HubStatError::InvalidState("monitoring server can only be started once"));
        }

        let listener =
            match tokio::net::TcpListener::bind((self.options.host.as_str(), self.options.port)).await {
                Ok(l) => l,
                Err(e) => {
                    self.logger.fatal(PLUGIN_INITIALIZATION_ERROR, &format!("Error: {e}"));
                    return Err(HubStatError::Bind {
                        addr: self.options.display_addr(),
                        reason: e.to_string(),
                    });
                }
            };
        let addr = listener
            .local_addr()
            .map_err(|e| HubStatError::Internal(format!("local_addr failed: {e}")))?;

        let router = http::build_router(self.app.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = server.await {
                tracing::error!(error = %e, "monitoring server error");
            }
        });

        self.running = Some(Running { addr, shutdown_tx, task });
        self.state = ListenerState::Listening;
        tracing::info!(%addr, "{}", self.description());
        Ok(addr)
    }

    /// Stop listening. Idempotent; an idle plugin goes straight to `Closed`.
    pub async fn close(&mut self) -> Result<()> {
        let running = self.running.take();
        self.state = ListenerState::Closed;
        if let Some(running) = running {
            let _ = running.shutdown_tx.send(());
            running
                .task
                .await
                .map_err(|e| HubStatError::Internal(format!("monitoring server task failed: {e}")))?;
            tracing::info!(addr = %running.addr, "monitoring server closed");
        }
        Ok(())
    }
}

impl Monitoring for HttpMonitoring {
    fn on_error_log(&self, level: LogLevel, event: &str, message: &str) {
        self.store.on_error_log(level, event, message);
    }

    fn on_login(&self, allowed: bool, endpoint_type: &str) {
        self.store.on_login(allowed, endpoint_type);
    }

    fn on_message_received(&self, message: &Message) {
        self.store.on_message_received(message);
    }

    fn on_message_sent(&self, message: &Message) {
        self.store.on_message_sent(message);
    }

    fn on_broadcast(&self, message: &Message, count: u64) {
        self.store.on_broadcast(message, count);
    }
}
