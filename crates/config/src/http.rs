//! HTTP-backed configuration store.
//!
//! Talks to the surrounding application's site-config endpoints:
//! `GET/PUT /site-config/{key}` and `POST /site-config`. The endpoint pair
//! has no native upsert, so [`HttpConfigStore::upsert`] hides the
//! PUT-then-POST-on-404 adapter detail behind the single trait operation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::store::{ConfigEntry, ConfigStore, ConfigStoreError};

/// A [`ConfigStore`] over the site-config REST endpoints.
pub struct HttpConfigStore {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct WritePayload<'a> {
    key: &'a str,
    value: &'a str,
    metadata: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ReadPayload {
    value: String,
    #[serde(default)]
    metadata: serde_json::Value,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl HttpConfigStore {
    /// Create a store targeting `{base_url}/site-config`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn key_url(&self, key: &str) -> String {
        format!("{}/site-config/{key}", self.base_url)
    }

    fn collection_url(&self) -> String {
        format!("{}/site-config", self.base_url)
    }

    async fn send_write(
        &self,
        request: reqwest::RequestBuilder,
        key: &str,
    ) -> Result<reqwest::StatusCode, ConfigStoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| ConfigStoreError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success()
            || status == reqwest::StatusCode::NOT_FOUND
            || status == reqwest::StatusCode::CONFLICT
        {
            return Ok(status);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ConfigStoreError::Transport(format!(
            "unexpected status {status} writing '{key}': {body}"
        )))
    }
}

#[async_trait]
impl ConfigStore for HttpConfigStore {
    async fn get(&self, key: &str) -> Result<Option<ConfigEntry>, ConfigStoreError> {
        let response = self
            .client
            .get(self.key_url(key))
            .send()
            .await
            .map_err(|e| ConfigStoreError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ConfigStoreError::Transport(format!(
                "unexpected status {} reading '{key}'",
                response.status()
            )));
        }

        let payload = response
            .json::<ReadPayload>()
            .await
            .map_err(|e| ConfigStoreError::Transport(e.to_string()))?;
        Ok(Some(ConfigEntry {
            value: payload.value,
            metadata: payload.metadata,
            updated_at: payload.updated_at.unwrap_or_else(chrono::Utc::now),
        }))
    }

    async fn put(
        &self,
        key: &str,
        value: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ConfigStoreError> {
        let payload = WritePayload {
            key,
            value,
            metadata: &metadata,
        };
        let status = self
            .send_write(self.client.put(self.key_url(key)).json(&payload), key)
            .await?;
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ConfigStoreError::NotFound(key.to_string()));
        }
        Ok(())
    }

    async fn create(
        &self,
        key: &str,
        value: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ConfigStoreError> {
        let payload = WritePayload {
            key,
            value,
            metadata: &metadata,
        };
        let status = self
            .send_write(self.client.post(self.collection_url()).json(&payload), key)
            .await?;
        if status == reqwest::StatusCode::CONFLICT {
            return Err(ConfigStoreError::Conflict(key.to_string()));
        }
        Ok(())
    }

    async fn upsert(
        &self,
        key: &str,
        value: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ConfigStoreError> {
        // PUT first; a 404 means the key has never been written, so fall
        // through to POST. A concurrent creator turning the POST into a
        // conflict still leaves the key present, which is the state upsert
        // promises, so a conflict here is treated as success.
        let payload = WritePayload {
            key,
            value,
            metadata: &metadata,
        };
        let status = self
            .send_write(self.client.put(self.key_url(key)).json(&payload), key)
            .await?;
        if status != reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        tracing::debug!(key, "Config key absent, creating");
        let status = self
            .send_write(self.client.post(self.collection_url()).json(&payload), key)
            .await?;
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ConfigStoreError::Transport(format!(
                "site-config collection endpoint missing while creating '{key}'"
            )));
        }
        Ok(())
    }
}
