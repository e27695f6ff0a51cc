//! Health probe and cache administration.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::state::SharedState;

pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "cached_sources": state.cache.cached_sources().await,
    }))
}

/// Drop every cached reference document; the next request refetches.
pub async fn reset_cache(State(state): State<SharedState>) -> Json<Value> {
    let dropped = state.cache.reset().await;
    info!(dropped, "Cache reset via admin endpoint");
    Json(json!({ "dropped": dropped }))
}
