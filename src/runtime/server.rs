use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{invoke, InvocationContext, InvocationPayload, InvocationResponse};
use crate::api::{internal_error, log_failure, ApiResult};
use crate::graph::ChatGraph;

/// Header carrying the platform's session identifier.
pub const SESSION_ID_HEADER: &str = "x-amzn-bedrock-agentcore-runtime-session-id";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PingResponse {
    pub status: String,
    pub time_of_last_update: u64,
}

/// Routes expected by the managed runtime host: `POST /invocations`, `GET /ping`.
pub fn runtime_router(graph: Arc<ChatGraph>) -> Router {
    Router::new()
        .route("/invocations", post(handle_invocation))
        .route("/ping", get(handle_ping))
        .with_state(graph)
}

async fn handle_invocation(
    State(graph): State<Arc<ChatGraph>>,
    headers: HeaderMap,
    Json(payload): Json<InvocationPayload>,
) -> ApiResult<Json<InvocationResponse>> {
    let context = InvocationContext {
        session_id: session_id_from(&headers),
    };
    invoke(&graph, payload, &context)
        .await
        .map(Json)
        .map_err(|e| {
            log_failure(&e);
            internal_error(e.to_string())
        })
}

async fn handle_ping() -> Json<PingResponse> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    Json(PingResponse {
        status: "Healthy".to_string(),
        time_of_last_update: now,
    })
}

fn session_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderName, HeaderValue};

    use super::*;

    #[test]
    fn session_header_is_read_case_insensitively() {
        let mut headers = HeaderMap::new();
        let name = HeaderName::from_bytes(b"X-Amzn-Bedrock-AgentCore-Runtime-Session-Id").unwrap();
        headers.insert(name, HeaderValue::from_static("sess-42"));
        assert_eq!(session_id_from(&headers).as_deref(), Some("sess-42"));
    }

    #[test]
    fn blank_session_header_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_ID_HEADER, HeaderValue::from_static(" "));
        assert_eq!(session_id_from(&headers), None);
    }
}
