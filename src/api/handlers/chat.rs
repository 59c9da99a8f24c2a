use axum::{extract::State, Json};

use super::helpers::{internal_error, log_failure, ApiResult};
use crate::api::types::{ChatRequest, ChatResponse};
use crate::api::ServerState;
use crate::chat::ChatMessage;
use crate::graph::ConversationState;
use crate::sanitize::strip_reasoning;

pub async fn handle_chat(
    State(state): State<ServerState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let messages = build_messages(req.history, req.message);
    log::info!("chat request with {} message(s)", messages.len());

    let result = state
        .graph
        .invoke(ConversationState::new(messages))
        .await
        .map_err(|e| {
            log_failure(&e);
            internal_error(e.to_string())
        })?;

    let content = result.last_content().unwrap_or_default();
    Ok(Json(ChatResponse {
        response: strip_reasoning(content),
    }))
}

fn build_messages(history: Vec<ChatMessage>, message: String) -> Vec<ChatMessage> {
    let mut messages = history;
    messages.push(ChatMessage::user().content(message).build());
    messages
}
