use std::sync::Arc;

use packshot_pipeline::Orchestrator;

/// Shared application state, cheap to clone into handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}
