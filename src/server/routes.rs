//! Axum routes for the honeypot endpoint.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use secrecy::{ExposeSecret, SecretString};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use super::schema::{EngagementMetrics, HoneypotResponse, ScamRequest};
use crate::pipeline::{ConversationTurn, TurnOrchestrator};
use crate::report::payload::agent_notes;

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

const SCAM_REPLY: &str = "I'm confused. Where do I send the details?";
const BENIGN_REPLY: &str = "Hello!";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: TurnOrchestrator,
    pub api_key: Arc<SecretString>,
}

/// Build the Axum router with the honeypot and health routes.
pub fn honeypot_routes(orchestrator: TurnOrchestrator, api_key: SecretString) -> Router {
    let state = AppState {
        orchestrator,
        api_key: Arc::new(api_key),
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/honeypot", post(handle_message))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Persona reply for a turn. Stalls the scammer to draw out more details.
pub fn agent_reply(scam_detected: bool) -> &'static str {
    if scam_detected { SCAM_REPLY } else { BENIGN_REPLY }
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "honeypot"
    }))
}

// ── Honeypot ────────────────────────────────────────────────────────────

async fn handle_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ScamRequest>,
) -> Response {
    if !is_authorized(&headers, &state.api_key) {
        warn!(session_id = %request.session_id, "Rejected request with invalid API key");
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"detail": "Invalid API key"})),
        )
            .into_response();
    }

    let total_messages = request.total_messages();
    let turn = ConversationTurn::new(
        request.session_id.clone(),
        request.message.text.clone(),
        total_messages,
    );
    let outcome = state.orchestrator.handle_turn(&turn).await;

    info!(
        session_id = %turn.session_id,
        total_messages,
        scam_detected = outcome.scam_detected,
        report_dispatched = outcome.report_dispatched,
        "Honeypot turn handled"
    );

    let response = HoneypotResponse {
        status: "success".to_string(),
        scam_detected: outcome.scam_detected,
        agent_reply: agent_reply(outcome.scam_detected).to_string(),
        engagement_metrics: EngagementMetrics {
            engagement_duration_seconds: request.engagement_duration_seconds(),
            total_messages_exchanged: total_messages,
        },
        agent_notes: agent_notes(&outcome.intelligence),
        extracted_intelligence: outcome.intelligence,
    };

    (StatusCode::OK, Json(response)).into_response()
}

fn is_authorized(headers: &HeaderMap, expected: &SecretString) -> bool {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|provided| provided == expected.expose_secret())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::report::{ReportDispatcher, SessionReportGate};

    struct NullSink;

    #[async_trait::async_trait]
    impl crate::report::ReportSink for NullSink {
        fn target(&self) -> &str {
            "null"
        }

        async fn deliver(
            &self,
            _payload: &crate::report::ReportPayload,
        ) -> Result<(), crate::error::DispatchError> {
            Ok(())
        }
    }

    fn app() -> Router {
        let orchestrator = TurnOrchestrator::new(
            SessionReportGate::new(),
            ReportDispatcher::new(Arc::new(NullSink)),
        );
        honeypot_routes(orchestrator, SecretString::from("test-key"))
    }

    fn post_json(key: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/honeypot")
            .header("content-type", "application/json");
        if let Some(key) = key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "sessionId": "route-test",
            "message": { "sender": "scammer", "text": text, "timestamp": "2026-01-21T10:00:00Z" },
            "conversationHistory": [],
            "metadata": { "channel": "SMS" }
        })
    }

    #[test]
    fn reply_depends_on_verdict() {
        assert_eq!(agent_reply(true), SCAM_REPLY);
        assert_eq!(agent_reply(false), BENIGN_REPLY);
    }

    #[tokio::test]
    async fn health_ok() {
        let resp = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn missing_key_is_unauthorized() {
        let resp = app()
            .oneshot(post_json(None, request_body("hello")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["detail"], "Invalid API key");
    }

    #[tokio::test]
    async fn wrong_key_is_unauthorized() {
        let resp = app()
            .oneshot(post_json(Some("nope"), request_body("hello")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn scam_message_response() {
        let resp = app()
            .oneshot(post_json(
                Some("test-key"),
                request_body("URGENT: your account is blocked, pay to help@upi"),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["scamDetected"], true);
        assert_eq!(json["agentReply"], SCAM_REPLY);
        assert_eq!(json["engagementMetrics"]["totalMessagesExchanged"], 1);
        assert_eq!(
            json["extractedIntelligence"]["upiIds"],
            serde_json::json!(["help@upi"])
        );
        assert!(json["agentNotes"].as_str().unwrap().contains("blocked"));
    }

    #[tokio::test]
    async fn benign_message_response() {
        let resp = app()
            .oneshot(post_json(Some("test-key"), request_body("hello there")))
            .await
            .unwrap();
        let json = body_json(resp).await;
        assert_eq!(json["scamDetected"], false);
        assert_eq!(json["agentReply"], BENIGN_REPLY);
        assert_eq!(json["extractedIntelligence"]["phishingLinks"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let resp = app()
            .oneshot(post_json(Some("test-key"), serde_json::json!({"sessionId": "x"})))
            .await
            .unwrap();
        assert!(resp.status().is_client_error());
    }
}
