use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

use hubstat_core::protocol::{LogLevel, Message};
use hubstat_core::Monitoring;

use super::counters::Counters;

/// Counter store: the single serialization point for every increment and for
/// snapshot-and-clear.
///
/// One lock covers all four families, so `take` observes either all or none
/// of any single increment, and an increment lands in exactly one snapshot.
#[derive(Default)]
pub struct CounterStore {
    inner: Mutex<Counters>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means a panic elsewhere while holding it; every
    // increment is a single integer write, so the data is still consistent.
    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record_error(&self, event_id: &str) {
        self.lock().add_error(event_id);
    }

    pub fn record_login(&self, endpoint_type: &str, allowed: bool) {
        self.lock().add_login(endpoint_type, allowed);
    }

    pub fn record_received(&self, topic: &str, action: &str) {
        self.lock().add_received(topic, action, 1);
    }

    pub fn record_sent(&self, topic: &str, action: &str) {
        self.lock().add_sent(topic, action, 1);
    }

    /// Fan-out of one message to `count` subscribers counts as `count`
    /// receptions. The sent side is never touched.
    pub fn record_broadcast(&self, topic: &str, action: &str, count: u64) {
        if count == 0 {
            return;
        }
        self.lock().add_received(topic, action, count);
    }

    /// Copy of the current counters, without clearing.
    pub fn peek(&self) -> Counters {
        self.lock().clone()
    }

    /// Swap out all four families for empty ones and return what was there.
    pub fn take(&self) -> Counters {
        mem::take(&mut *self.lock())
    }
}

impl Monitoring for CounterStore {
    fn on_error_log(&self, _level: LogLevel, event: &str, _message: &str) {
        self.record_error(event);
    }

    fn on_login(&self, allowed: bool, endpoint_type: &str) {
        self.record_login(endpoint_type, allowed);
    }

    fn on_message_received(&self, message: &Message) {
        self.record_received(message.topic.as_str(), &message.action);
    }

    fn on_message_sent(&self, message: &Message) {
        self.record_sent(message.topic.as_str(), &message.action);
    }

    fn on_broadcast(&self, message: &Message, count: u64) {
        self.record_broadcast(message.topic.as_str(), &message.action, count);
    }
}
