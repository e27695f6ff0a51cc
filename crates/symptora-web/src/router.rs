//! Axum router: maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    sms::sms,
    system::{health, reset_cache},
    webhook::webhook,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Collaborator endpoints
        .route("/webhook", post(webhook))
        .route("/sms", post(sms))

        // Operations
        .route("/health", get(health))
        .route("/admin/cache/reset", post(reset_cache))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use symptora_data::{MockFetcher, ReferenceCache, SourceUrls};
    use symptora_ranker::Ranker;
    use symptora_test_utils::fixtures;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let fetcher = MockFetcher::new()
            .with("mem://diseases", fixtures::diseases_json())
            .with("mem://symptoms", fixtures::symptoms_json())
            .with("mem://preventions", fixtures::preventions_json());
        let sources = SourceUrls {
            diseases: "mem://diseases".to_string(),
            symptoms: "mem://symptoms".to_string(),
            preventions: "mem://preventions".to_string(),
            symptom_index: None,
        };
        AppState::new(Arc::new(ReferenceCache::new(Arc::new(fetcher), sources)), Ranker::default())
    }

    fn post(uri: &str, content_type: &str, body: impl Into<String>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.into()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn webhook_json(app: Router, body: Value) -> Value {
        let response = app
            .oneshot(post("/webhook", "application/json", body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_webhook_disease_info() {
        let app = build_router(test_state());
        let reply = webhook_json(
            app,
            json!({
                "queryResult": {
                    "intent": { "displayName": "disease_info" },
                    "parameters": { "diseases": "flu" },
                    "queryText": "what is flu"
                }
            }),
        )
        .await;

        assert_eq!(
            reply["fulfillmentText"],
            "**Influenza**\nSymptoms: fever, cough, body ache, fatigue\nPrevention: Get the annual flu vaccine; Wash hands frequently"
        );
        assert_eq!(reply["payload"]["symptora"]["primary_entity"], "Influenza");
    }

    #[tokio::test]
    async fn test_webhook_unknown_disease() {
        let app = build_router(test_state());
        let reply = webhook_json(
            app,
            json!({
                "queryResult": {
                    "intent": { "displayName": "disease_info" },
                    "parameters": { "diseases": "zika" }
                }
            }),
        )
        .await;

        assert_eq!(reply["fulfillmentText"], "Sorry, I don't have information about 'zika'.");
        assert_eq!(reply["payload"]["symptora"]["kind"], "not_found");
    }

    #[tokio::test]
    async fn test_webhook_symptom_checker() {
        let app = build_router(test_state());
        let reply = webhook_json(
            app,
            json!({
                "queryResult": {
                    "intent": { "displayName": "symptom_checker" },
                    "parameters": { "symptoms": "fever, cough and sneezing" }
                }
            }),
        )
        .await;

        let result = &reply["payload"]["symptora"];
        assert_eq!(result["kind"], "symptom_match");
        // Common Cold: cough + sneezing (2 of 3), Influenza: fever + cough (2 of 4)
        assert_eq!(result["ranked"][0]["disease"], "Influenza");
        assert_eq!(result["ranked"][1]["disease"], "Common Cold");
        assert_eq!(result["ranked"][1]["percent"], 66.7);
    }

    #[tokio::test]
    async fn test_webhook_malformed_body_gets_apology() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post("/webhook", "application/json", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let reply: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(reply["fulfillmentText"], crate::render::APOLOGY);
    }

    #[tokio::test]
    async fn test_sms_disease_question() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post(
                "/sms",
                "application/x-www-form-urlencoded",
                "From=%2B15550100&Body=Tell+me+about+malaria",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "application/xml");
        let xml = body_text(response).await;
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<Response><Message>**Malaria**\nSymptoms: fever, chills, sweating, headache"));
    }

    #[tokio::test]
    async fn test_sms_synonym_resolves_disease() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post("/sms", "application/x-www-form-urlencoded", "Body=Grippe"))
            .await
            .unwrap();

        let xml = body_text(response).await;
        assert!(xml.contains("<Message>**Influenza**\nSymptoms: fever, cough, body ache, fatigue"));
        assert!(!xml.contains("Sorry"));
    }

    #[tokio::test]
    async fn test_sms_symptom_list() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post(
                "/sms",
                "application/x-www-form-urlencoded",
                "Body=symptoms%3A+fever%2C+headache",
            ))
            .await
            .unwrap();

        let xml = body_text(response).await;
        assert!(xml.contains("1. Malaria (2 matching, 50.0%)"));
        assert!(xml.contains("Do you also have: chills, sweating"));
    }

    #[tokio::test]
    async fn test_sms_empty_body_prompts() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post("/sms", "application/x-www-form-urlencoded", "Body="))
            .await
            .unwrap();

        let xml = body_text(response).await;
        assert!(xml.contains("Please tell me a disease name"));
    }

    #[tokio::test]
    async fn test_health_reports_warm_sources_and_reset_clears_them() {
        let state = Arc::new(test_state());
        let cache = Arc::clone(&state.cache);
        cache.snapshot().await;

        let app = build_router(AppState::new(cache, Ranker::default()));
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let health: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(health["status"], "ok");
        assert_eq!(health["cached_sources"].as_array().unwrap().len(), 3);

        let response = app
            .oneshot(post("/admin/cache/reset", "application/json", ""))
            .await
            .unwrap();
        let reset: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(reset["dropped"], 3);
        assert!(state.cache.cached_sources().await.is_empty());
    }
}
