use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod studio_photo;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/studio-photo/process", post(studio_photo::process))
        .route("/api/studio-photo/generate", post(studio_photo::generate))
        .with_state(state)
}
