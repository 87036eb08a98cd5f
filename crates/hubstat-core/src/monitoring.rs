//! Host-facing monitoring hooks.
//!
//! The host holds an `Arc<dyn Monitoring>` and calls these synchronously from
//! its own handlers. Implementations must be cheap, non-blocking, and
//! infallible.

use crate::protocol::{LogLevel, Message};

pub trait Monitoring: Send + Sync {
    /// An error-level log line was emitted by the host.
    fn on_error_log(&self, level: LogLevel, event: &str, message: &str);

    /// A login attempt finished on the given endpoint type.
    fn on_login(&self, allowed: bool, endpoint_type: &str);

    /// A message was received from a client.
    fn on_message_received(&self, message: &Message);

    /// A message was sent to a single client.
    fn on_message_sent(&self, message: &Message);

    /// A message was fanned out to `count` subscribers.
    fn on_broadcast(&self, message: &Message, count: u64);
}
