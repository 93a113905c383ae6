//! In-memory configuration store, used by tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{ConfigEntry, ConfigStore, ConfigStoreError};

/// A [`ConfigStore`] backed by a `RwLock<HashMap>`.
#[derive(Default)]
pub struct MemoryConfigStore {
    entries: RwLock<HashMap<String, ConfigEntry>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(value: &str, metadata: serde_json::Value) -> ConfigEntry {
        ConfigEntry {
            value: value.to_string(),
            metadata,
            updated_at: chrono::Utc::now(),
        }
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get(&self, key: &str) -> Result<Option<ConfigEntry>, ConfigStoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(
        &self,
        key: &str,
        value: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ConfigStoreError> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            Some(existing) => {
                *existing = Self::entry(value, metadata);
                Ok(())
            }
            None => Err(ConfigStoreError::NotFound(key.to_string())),
        }
    }

    async fn create(
        &self,
        key: &str,
        value: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ConfigStoreError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(key) {
            return Err(ConfigStoreError::Conflict(key.to_string()));
        }
        entries.insert(key.to_string(), Self::entry(value, metadata));
        Ok(())
    }

    async fn upsert(
        &self,
        key: &str,
        value: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ConfigStoreError> {
        // Single write-lock acquisition: no window for a concurrent writer
        // between the existence check and the write.
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), Self::entry(value, metadata));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
