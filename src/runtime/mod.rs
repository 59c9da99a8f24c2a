//! Managed agent-runtime entrypoint.
//!
//! Each call runs the graph on the prompt alone: no history is replayed and
//! the reply is returned exactly as the model produced it.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::error::LLMError;
use crate::graph::{ChatGraph, ConversationState};

#[cfg(feature = "api")]
mod server;

#[cfg(feature = "api")]
pub use server::{runtime_router, PingResponse, SESSION_ID_HEADER};

pub const DEFAULT_SESSION_ID: &str = "default";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InvocationPayload {
    #[serde(default)]
    pub prompt: String,
}

/// Host-supplied metadata for one invocation.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    pub session_id: Option<String>,
}

impl InvocationContext {
    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
        }
    }

    pub fn session_id(&self) -> &str {
        self.session_id.as_deref().unwrap_or(DEFAULT_SESSION_ID)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InvocationResponse {
    pub response: String,
    pub session_id: String,
}

/// Runs one turn for the managed runtime. Errors are returned to the host
/// untouched.
pub async fn invoke(
    graph: &ChatGraph,
    payload: InvocationPayload,
    context: &InvocationContext,
) -> Result<InvocationResponse, LLMError> {
    let session_id = context.session_id().to_string();
    log::info!("runtime invocation for session {session_id}");

    let state = ConversationState::new(vec![ChatMessage::user().content(payload.prompt).build()]);
    let result = graph.invoke(state).await?;

    Ok(InvocationResponse {
        response: result.last_content().unwrap_or_default().to_string(),
        session_id,
    })
}
