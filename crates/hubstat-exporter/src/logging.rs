//! Logging integration.
//!
//! - `TracingLogger`: the logger collaborator, backed by `tracing`.
//! - `ErrorLogLayer`: routes ERROR-level `tracing` events into the
//!   error-log hook, keyed by their `event` field.
//! - `init_tracing`: subscriber setup for the standalone binary.

use std::fmt;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use hubstat_core::error::{HubStatError, Result};
use hubstat_core::protocol::LogLevel;
use hubstat_core::services::Logger;
use hubstat_core::Monitoring;

pub const NAMESPACE: &str = "HTTP_MONITORING";

/// Logger collaborator forwarding to `tracing` under a fixed namespace.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    namespace: &'static str,
}

impl TracingLogger {
    pub fn new(namespace: &'static str) -> Self {
        Self { namespace }
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(NAMESPACE)
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, event: &str, message: &str) {
        let ns = self.namespace;
        match level {
            LogLevel::Debug => tracing::debug!(namespace = ns, event = event, "{message}"),
            LogLevel::Info => tracing::info!(namespace = ns, event = event, "{message}"),
            LogLevel::Warn => tracing::warn!(namespace = ns, event = event, "{message}"),
            LogLevel::Error => tracing::error!(namespace = ns, event = event, "{message}"),
            LogLevel::Fatal => {
                tracing::error!(namespace = ns, event = event, fatal = true, "{message}")
            }
        }
    }
}

/// Counts ERROR-level events through the error-log hook.
///
/// The event kind is the `event` field if present, else the callsite target.
/// `fatal = true` marks the event as `LogLevel::Fatal`.
pub struct ErrorLogLayer {
    monitoring: Arc<dyn Monitoring>,
}

impl ErrorLogLayer {
    pub fn new(monitoring: Arc<dyn Monitoring>) -> Self {
        Self { monitoring }
    }
}

impl<S> Layer<S> for ErrorLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() != Level::ERROR {
            return;
        }

        let mut fields = EventFields::default();
        event.record(&mut fields);

        let level = if fields.fatal { LogLevel::Fatal } else { LogLevel::Error };
        let kind = fields.event.as_deref().unwrap_or(meta.target());
        self.monitoring
            .on_error_log(level, kind, fields.message.as_deref().unwrap_or_default());
    }
}

#[derive(Default)]
struct EventFields {
    event: Option<String>,
    message: Option<String>,
    fatal: bool,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_owned()),
            "message" => self.message = Some(value.to_owned()),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "fatal" {
            self.fatal = value;
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "event" => self.event = Some(format!("{value:?}")),
            "message" => self.message = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

/// Install the global subscriber: `fmt` output filtered by `RUST_LOG`
/// (default `info`), plus the error-log layer when a hook target is given.
pub fn init_tracing(monitoring: Option<Arc<dyn Monitoring>>) -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .with(monitoring.map(ErrorLogLayer::new))
        .try_init()
        .map_err(|e| HubStatError::Internal(format!("tracing init failed: {e}")))
}
