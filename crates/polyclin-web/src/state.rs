//! Shared application state for the web server.

use std::sync::Arc;

use polyclin_llm::AdvisoryBackend;
use polyclin_models::ModelRegistry;

/// Shared state injected into every Axum handler.
///
/// The registry and the advisory backend are built once at startup and only
/// ever read afterwards. Which workflow is active is carried by the request
/// path, never stored here, so concurrent sessions cannot interfere.
pub struct AppState {
    pub registry: ModelRegistry,
    pub advisory: Arc<dyn AdvisoryBackend>,
}

impl AppState {
    pub fn new(registry: ModelRegistry, advisory: Arc<dyn AdvisoryBackend>) -> Self {
        Self { registry, advisory }
    }
}

pub type SharedState = Arc<AppState>;
