//! Messaging gateway endpoint. Form-encoded `Body` in, TwiML out.

use axum::{
    extract::{rejection::FormRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::fulfillment::{route_text, Fulfillment, Intent};
use crate::render::{self, APOLOGY, FALLBACK_TWIML};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct SmsForm {
    #[serde(rename = "Body", default)]
    pub body: String,
}

#[instrument(skip_all)]
pub async fn sms(
    State(state): State<SharedState>,
    form: Result<Form<SmsForm>, FormRejection>,
) -> Response {
    let text = match form {
        Ok(Form(f)) => f.body,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable SMS form");
            return xml_response(APOLOGY);
        }
    };

    let data = state.cache.snapshot().await;
    let result = route_text(&text, &data, &state.ranker);
    info!(kind = ?result.kind, "Answered SMS");

    let message = render::render_text(&Fulfillment { intent: Intent::Unrouted, result });
    xml_response(&message)
}

fn xml_response(message: &str) -> Response {
    let body = render::twiml(message).unwrap_or_else(|e| {
        warn!(error = %e, "TwiML encoding failed");
        FALLBACK_TWIML.to_string()
    });
    ([(header::CONTENT_TYPE, "application/xml")], body).into_response()
}
