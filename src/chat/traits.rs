use async_trait::async_trait;

use crate::error::LLMError;

use super::message::ChatMessage;
use super::usage::Usage;

pub trait ChatResponse: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn text(&self) -> Option<String>;
    fn thinking(&self) -> Option<String> {
        None
    }
    fn usage(&self) -> Option<Usage> {
        None
    }
}

/// Trait for remote models that answer a chat conversation.
///
/// Implementations perform exactly one outbound call per `chat` and hold no
/// per-conversation state, so a single instance can serve concurrent turns.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError>;

    /// Identifier of the model behind this provider, for logging.
    fn model_id(&self) -> &str {
        "unknown"
    }
}
