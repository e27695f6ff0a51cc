//! Shared application state for the web server.

use std::sync::Arc;

use symptora_data::ReferenceCache;
use symptora_ranker::Ranker;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub cache: Arc<ReferenceCache>,
    pub ranker: Ranker,
}

impl AppState {
    pub fn new(cache: Arc<ReferenceCache>, ranker: Ranker) -> Self {
        Self { cache, ranker }
    }
}

pub type SharedState = Arc<AppState>;
