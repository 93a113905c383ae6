use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A stored configuration value plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub value: String,
    /// Free-form metadata attached by the writer (section, label, etc.).
    pub metadata: serde_json::Value,
    pub updated_at: Timestamp,
}

/// Point read/write store for opaque string keys.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read a key. Absent keys are `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<ConfigEntry>, ConfigStoreError>;

    /// Overwrite an existing key. Fails with [`ConfigStoreError::NotFound`]
    /// when the key does not exist.
    async fn put(
        &self,
        key: &str,
        value: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ConfigStoreError>;

    /// Create a new key. Fails with [`ConfigStoreError::Conflict`] when the
    /// key already exists.
    async fn create(
        &self,
        key: &str,
        value: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ConfigStoreError>;

    /// Create-or-overwrite in one idempotent operation. Implementations
    /// provide this directly rather than leaving callers to sequence
    /// `put` and `create` with a fallback.
    async fn upsert(
        &self,
        key: &str,
        value: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ConfigStoreError>;
}

/// Errors from a configuration-store implementation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigStoreError {
    /// `put` targeted a key that does not exist.
    #[error("Config key not found: {0}")]
    NotFound(String),

    /// `create` targeted a key that already exists.
    #[error("Config key already exists: {0}")]
    Conflict(String),

    /// The backing transport failed.
    #[error("Config store transport error: {0}")]
    Transport(String),
}
