use std::sync::Arc;

use dashmap::{DashMap, DashSet};

use hubstat_core::error::Result;
use hubstat_core::protocol::RegistryTopic;
use hubstat_core::services::{StateRegistry, StateRegistryProvider};

/// Set of entry names for one topic (subscriptions, online users...).
#[derive(Default)]
pub struct InMemoryStateRegistry {
    entries: DashSet<String>,
}

impl InMemoryStateRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashSet::new(),
        }
    }

    /// Returns false if the entry was already present.
    pub fn add(&self, name: impl Into<String>) -> bool {
        self.entries.insert(name.into())
    }

    pub fn remove(&self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateRegistry for InMemoryStateRegistry {
    fn entries(&self) -> Result<Vec<String>> {
        Ok(self.entries.iter().map(|e| e.key().clone()).collect())
    }
}

/// topic -> registry, created on first use.
#[derive(Default)]
pub struct InMemoryStateRegistries {
    registries: DashMap<RegistryTopic, Arc<InMemoryStateRegistry>>,
}

impl InMemoryStateRegistries {
    pub fn new() -> Self {
        Self {
            registries: DashMap::new(),
        }
    }

    /// Get or create the registry for `topic`.
    pub fn registry(&self, topic: impl Into<RegistryTopic>) -> Arc<InMemoryStateRegistry> {
        self.registries
            .entry(topic.into())
            .or_insert_with(|| Arc::new(InMemoryStateRegistry::new()))
            .value()
            .clone()
    }
}

impl StateRegistryProvider for InMemoryStateRegistries {
    fn state_registries(&self) -> Result<Vec<(RegistryTopic, Arc<dyn StateRegistry>)>> {
        Ok(self
            .registries
            .iter()
            .map(|e| {
                let registry: Arc<dyn StateRegistry> = e.value().clone();
                (*e.key(), registry)
            })
            .collect())
    }
}
