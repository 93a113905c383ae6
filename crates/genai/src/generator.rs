//! The generation-service contract consumed by the orchestrator.

use async_trait::async_trait;
use packshot_core::types::EncodedImage;

/// One independent generation call: reference image + prompt text in,
/// exactly one encoded image out, or a service error.
///
/// Implementations must be safe to call concurrently; the orchestrator
/// fires one call per requested slot without waiting between them.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(
        &self,
        reference: &EncodedImage,
        prompt: &str,
    ) -> Result<EncodedImage, GenAiError>;
}

/// Errors from the generation-service layer.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered successfully but returned no image payload.
    #[error("Generation service did not return an image")]
    NoImage,

    /// No API key was configured for the service.
    #[error("Generation API key is not configured")]
    MissingApiKey,
}
