//! Topic names.
//!
//! Counters and gauges are keyed by the human-readable name of a topic, never
//! by its numeric wire id, so the JSON snapshot reads the same across host
//! versions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message topic (routing namespace of a host message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Topic {
    Error,
    Parser,
    Connection,
    Auth,
    Event,
    Record,
    Rpc,
    Presence,
    Monitoring,
    Cluster,
    Lock,
    StateRegistry,
}

impl Topic {
    /// Wire name, as used for snapshot keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Error => "ERROR",
            Topic::Parser => "PARSER",
            Topic::Connection => "CONNECTION",
            Topic::Auth => "AUTH",
            Topic::Event => "EVENT",
            Topic::Record => "RECORD",
            Topic::Rpc => "RPC",
            Topic::Presence => "PRESENCE",
            Topic::Monitoring => "MONITORING",
            Topic::Cluster => "CLUSTER",
            Topic::Lock => "LOCK",
            Topic::StateRegistry => "STATE_REGISTRY",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topics that only exist as replicated state registries (subscriptions,
/// listen patterns, publishers...), with no message traffic of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateTopic {
    RecordSubscriptions,
    RecordListenPatterns,
    RecordPublisher,
    RecordListening,
    EventSubscriptions,
    EventListenPatterns,
    EventPublisher,
    EventListening,
    RpcProviders,
    PresenceSubscriptions,
    OnlineUsers,
}

impl StateTopic {
    pub fn as_str(self) -> &'static str {
        match self {
            StateTopic::RecordSubscriptions => "RECORD_SUBSCRIPTIONS",
            StateTopic::RecordListenPatterns => "RECORD_LISTEN_PATTERNS",
            StateTopic::RecordPublisher => "RECORD_PUBLISHER",
            StateTopic::RecordListening => "RECORD_LISTENING",
            StateTopic::EventSubscriptions => "EVENT_SUBSCRIPTIONS",
            StateTopic::EventListenPatterns => "EVENT_LISTEN_PATTERNS",
            StateTopic::EventPublisher => "EVENT_PUBLISHER",
            StateTopic::EventListening => "EVENT_LISTENING",
            StateTopic::RpcProviders => "RPC_PROVIDERS",
            StateTopic::PresenceSubscriptions => "PRESENCE_SUBSCRIPTIONS",
            StateTopic::OnlineUsers => "ONLINE_USERS",
        }
    }
}

impl fmt::Display for StateTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of one state registry: either a plain message topic or a state-only topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegistryTopic {
    Topic(Topic),
    State(StateTopic),
}

impl RegistryTopic {
    /// Name reported under `stateMetrics`.
    pub fn name(self) -> &'static str {
        match self {
            RegistryTopic::Topic(t) => t.as_str(),
            RegistryTopic::State(s) => s.as_str(),
        }
    }
}

impl From<Topic> for RegistryTopic {
    fn from(t: Topic) -> Self {
        RegistryTopic::Topic(t)
    }
}

impl From<StateTopic> for RegistryTopic {
    fn from(s: StateTopic) -> Self {
        RegistryTopic::State(s)
    }
}

impl fmt::Display for RegistryTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
