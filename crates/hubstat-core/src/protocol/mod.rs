//! Protocol-level names shared with the messaging host.
//!
//! - `topic`: message topics and state-registry topics, with their wire names
//! - `message`: the routed message header the hooks receive, plus log levels

pub mod message;
pub mod topic;

pub use message::{LogLevel, Message};
pub use topic::{RegistryTopic, StateTopic, Topic};
