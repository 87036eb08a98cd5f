//! Message header and log severity as seen by the monitoring hooks.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::topic::Topic;

/// Routed message header.
///
/// Only the routing pair matters to monitoring; payloads never reach the hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    /// Message topic.
    pub topic: Topic,
    /// Action name within the topic (e.g. `READ`, `SUBSCRIBE`).
    pub action: String,
}

impl Message {
    pub fn new(topic: Topic, action: impl Into<String>) -> Self {
        Self {
            topic,
            action: action.into(),
        }
    }
}

/// Log severity passed through the error-log hook and the logger collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
