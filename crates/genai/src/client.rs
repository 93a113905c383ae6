//! REST client for the Gemini-style image generation endpoint.
//!
//! Wraps `POST {api_url}/models/{model}:generateContent` using [`reqwest`].
//! Each call carries the reference image as an inline-data part, the prompt
//! as a text part, and pins the output to a square aspect ratio.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use packshot_core::prompt::ASPECT_RATIO;
use packshot_core::types::EncodedImage;

use crate::generator::{GenAiError, ImageGenerator};

/// Image model used for every generation unit.
pub const IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

/// HTTP client for the image generation service.
pub struct GenAiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GenAiClient {
    /// Create a new client.
    ///
    /// * `api_url` - base URL of the generation API.
    /// * `api_key` - service API key; requests fail with
    ///   [`GenAiError::MissingApiKey`] when empty.
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model: IMAGE_MODEL.to_string(),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (connection
    /// pooling when several components talk to the same host).
    pub fn with_client(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
            model: IMAGE_MODEL.to_string(),
        }
    }

    /// Override the model name (tests, preview rollouts).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or capture the status
    /// and body text for debugging.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GenAiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ImageGenerator for GenAiClient {
    async fn generate(
        &self,
        reference: &EncodedImage,
        prompt: &str,
    ) -> Result<EncodedImage, GenAiError> {
        if self.api_key.is_empty() {
            return Err(GenAiError::MissingApiKey);
        }

        let body = GenerateContentRequest::new(reference, prompt);
        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let parsed = response.json::<GenerateContentResponse>().await?;
        parsed.into_image().ok_or(GenAiError::NoImage)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Contents>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Contents {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    data: String,
    mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
    image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl GenerateContentRequest {
    fn new(reference: &EncodedImage, prompt: &str) -> Self {
        Self {
            contents: vec![Contents {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            data: reference.data.clone(),
                            mime_type: reference.mime_type.clone(),
                        }),
                        text: None,
                    },
                    Part {
                        inline_data: None,
                        text: Some(prompt.to_string()),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE"],
                image_config: ImageConfig {
                    aspect_ratio: ASPECT_RATIO,
                },
            },
        }
    }
}

impl GenerateContentResponse {
    /// First inline-data part of the first candidate, if any.
    fn into_image(self) -> Option<EncodedImage> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().find_map(|p| p.inline_data))
            .map(|inline| EncodedImage::new(inline.data, inline.mime_type))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
