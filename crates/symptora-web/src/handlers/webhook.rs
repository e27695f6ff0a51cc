//! Dialogue-platform fulfillment webhook.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::{instrument, warn};

use crate::fulfillment::{fulfill, WebhookRequest};
use crate::render;
use crate::state::SharedState;

/// Always answers 200 with a `fulfillmentText`; unreadable bodies get the
/// apology.
#[instrument(skip_all)]
pub async fn webhook(
    State(state): State<SharedState>,
    payload: Result<Json<WebhookRequest>, JsonRejection>,
) -> Json<Value> {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable webhook body");
            return Json(render::apology_reply());
        }
    };

    let data = state.cache.snapshot().await;
    let fulfillment = fulfill(&request, &data, &state.ranker);
    Json(render::webhook_reply(&fulfillment))
}
