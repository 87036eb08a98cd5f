//! Counter families accumulated between two snapshots.
//!
//! All maps are `BTreeMap` so rendering is ordered by key without a sort pass.
//! Keys are created lazily on first increment; a family nothing was recorded
//! into stays an empty map.

use std::collections::BTreeMap;

use serde::Serialize;

/// event id -> occurrences
pub type ErrorCounters = BTreeMap<String, u64>;

/// topic -> action -> occurrences
pub type DirectionalCounters = BTreeMap<String, BTreeMap<String, u64>>;

/// endpoint type -> login outcomes
pub type LoginCounters = BTreeMap<String, LoginStats>;

/// Login outcomes for one endpoint type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoginStats {
    pub allowed: u64,
    pub declined: u64,
}

/// The four mutable counter families, swapped out wholesale on snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    pub errors: ErrorCounters,
    pub received: DirectionalCounters,
    pub sent: DirectionalCounters,
    pub logins: LoginCounters,
}

impl Counters {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
            && self.received.is_empty()
            && self.sent.is_empty()
            && self.logins.is_empty()
    }

    /// Sum of every counter across all four families.
    pub fn total(&self) -> u64 {
        let errors = self.errors.values().copied();
        let received = self.received.values().flat_map(|m| m.values().copied());
        let sent = self.sent.values().flat_map(|m| m.values().copied());
        let logins = self.logins.values().flat_map(|s| [s.allowed, s.declined]);
        errors
            .chain(received)
            .chain(sent)
            .chain(logins)
            .fold(0u64, u64::saturating_add)
    }

    pub(crate) fn add_error(&mut self, event_id: &str) {
        bump(&mut self.errors, event_id, 1);
    }

    pub(crate) fn add_login(&mut self, endpoint_type: &str, allowed: bool) {
        let stats = self.logins.entry(endpoint_type.to_string()).or_default();
        if allowed {
            stats.allowed = stats.allowed.saturating_add(1);
        } else {
            stats.declined = stats.declined.saturating_add(1);
        }
    }

    pub(crate) fn add_received(&mut self, topic: &str, action: &str, n: u64) {
        bump_nested(&mut self.received, topic, action, n);
    }

    pub(crate) fn add_sent(&mut self, topic: &str, action: &str, n: u64) {
        bump_nested(&mut self.sent, topic, action, n);
    }
}

fn bump(map: &mut BTreeMap<String, u64>, key: &str, n: u64) {
    let v = map.entry(key.to_string()).or_insert(0);
    *v = v.saturating_add(n);
}

fn bump_nested(map: &mut DirectionalCounters, topic: &str, action: &str, n: u64) {
    let actions = map.entry(topic.to_string()).or_default();
    bump(actions, action, n);
}
