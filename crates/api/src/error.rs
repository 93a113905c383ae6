use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use packshot_pipeline::PipelineError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent `{ error, code }`
/// JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A pipeline error (pre-processing or orchestration).
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Pipeline(pipeline) => match pipeline {
                PipelineError::InvalidRequest(e) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
                }
                PipelineError::Preprocess(e) => {
                    tracing::error!(error = %e, "Pre-processing failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "PREPROCESS_FAILED",
                        "Failed to process the reference image".to_string(),
                    )
                }
                PipelineError::AllSlotsFailed { failures } => {
                    tracing::error!(failed = failures.len(), "All generation units failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "GENERATION_FAILED",
                        "All image generations failed".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
