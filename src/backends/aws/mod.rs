//! AWS Bedrock backend implementation
//!
//! Talks to the Bedrock Runtime Converse API. Credentials are resolved through
//! the standard AWS provider chain the first time a request is made.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockruntime::{
    error::{DisplayErrorContext, SdkError},
    operation::converse::{ConverseError, ConverseOutput as ConverseResponse},
    types::{
        ContentBlock, ConversationRole, ConverseOutput, InferenceConfiguration, Message,
        ReasoningContentBlock, SystemContentBlock,
    },
    Client as BedrockClient,
};
use tokio::sync::OnceCell;

use crate::chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole, Usage};
use crate::config::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::error::LLMError;
use crate::sanitize::{REASONING_CLOSE, REASONING_OPEN};

mod error;

pub use error::{BedrockError, Result};

/// AWS Bedrock backend client
#[derive(Clone)]
pub struct BedrockBackend {
    client: Arc<OnceCell<BedrockClient>>,
    region: String,
    model_id: String,
    max_tokens: u32,
    temperature: f32,
}

impl fmt::Debug for BedrockBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BedrockBackend")
            .field("region", &self.region)
            .field("model_id", &self.model_id)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl BedrockBackend {
    /// Create a backend for `model_id` in `region`. No AWS call is made yet.
    pub fn new(region: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            client: Arc::new(OnceCell::new()),
            region: region.into(),
            model_id: model_id.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Get the AWS region
    pub fn region(&self) -> &str {
        &self.region
    }

    async fn get_client(&self) -> &BedrockClient {
        self.client
            .get_or_init(|| async {
                log::debug!("loading AWS configuration for region {}", self.region);
                let config = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(self.region.clone()))
                    .load()
                    .await;
                BedrockClient::new(&config)
            })
            .await
    }

    /// Chat with the model using the Converse API
    pub async fn converse(&self, messages: &[ChatMessage]) -> Result<BedrockResponse> {
        let (system, conversation) = convert_messages(messages)?;
        let client = self.get_client().await;

        let response = client
            .converse()
            .model_id(&self.model_id)
            .set_system((!system.is_empty()).then_some(system))
            .set_messages(Some(conversation))
            .inference_config(
                InferenceConfiguration::builder()
                    .max_tokens(i32::try_from(self.max_tokens).unwrap_or(i32::MAX))
                    .temperature(self.temperature)
                    .build(),
            )
            .send()
            .await
            .map_err(classify_error)?;

        convert_response(response)
    }
}

/// Splits system prompts out of the history and converts the rest to
/// Converse messages, preserving order.
fn convert_messages(messages: &[ChatMessage]) -> Result<(Vec<SystemContentBlock>, Vec<Message>)> {
    let mut system = Vec::new();
    let mut conversation = Vec::with_capacity(messages.len());
    for msg in messages {
        let role = match msg.role {
            ChatRole::System => {
                system.push(SystemContentBlock::Text(msg.content.clone()));
                continue;
            }
            ChatRole::User => ConversationRole::User,
            ChatRole::Assistant => ConversationRole::Assistant,
        };
        let message = Message::builder()
            .role(role)
            .content(ContentBlock::Text(msg.content.clone()))
            .build()
            .map_err(|e| BedrockError::InvalidRequest(e.to_string()))?;
        conversation.push(message);
    }
    if conversation.is_empty() {
        return Err(BedrockError::InvalidRequest(
            "at least one user or assistant message is required".to_string(),
        ));
    }
    Ok((system, conversation))
}

fn convert_response(response: ConverseResponse) -> Result<BedrockResponse> {
    let message = match response.output() {
        Some(ConverseOutput::Message(msg)) => msg,
        Some(_) => {
            return Err(BedrockError::InvalidResponse(
                "Unexpected output type".to_string(),
            ))
        }
        None => {
            return Err(BedrockError::InvalidResponse(
                "No output in response".to_string(),
            ))
        }
    };

    let (text, thinking) = collect_content(message.content());
    let usage = response.usage().map(|u| {
        Usage::new(
            u32::try_from(u.input_tokens()).unwrap_or_default(),
            u32::try_from(u.output_tokens()).unwrap_or_default(),
        )
    });

    Ok(BedrockResponse {
        text,
        thinking,
        usage,
        stop_reason: response.stop_reason().as_str().to_string(),
    })
}

/// Concatenates text blocks. Reasoning blocks are kept separately and also
/// rendered inline between reasoning markers ahead of the answer.
fn collect_content(blocks: &[ContentBlock]) -> (String, Option<String>) {
    let mut answer = String::new();
    let mut reasoning = String::new();
    for block in blocks {
        match block {
            ContentBlock::Text(text) => answer.push_str(text),
            ContentBlock::ReasoningContent(ReasoningContentBlock::ReasoningText(r)) => {
                reasoning.push_str(r.text())
            }
            _ => {}
        }
    }
    if reasoning.is_empty() {
        return (answer, None);
    }
    let text = format!("{REASONING_OPEN}{reasoning}{REASONING_CLOSE}{answer}");
    (text, Some(reasoning))
}

fn classify_error(err: SdkError<ConverseError>) -> BedrockError {
    let detail = DisplayErrorContext(&err).to_string();
    match err.as_service_error() {
        Some(ConverseError::AccessDeniedException(_)) => BedrockError::AccessDenied(detail),
        Some(ConverseError::ThrottlingException(_)) => BedrockError::Throttled(detail),
        Some(ConverseError::ValidationException(_))
        | Some(ConverseError::ResourceNotFoundException(_)) => BedrockError::InvalidRequest(detail),
        _ => BedrockError::ApiError(detail),
    }
}

/// One Converse reply.
#[derive(Debug, Clone)]
pub struct BedrockResponse {
    pub text: String,
    pub thinking: Option<String>,
    pub usage: Option<Usage>,
    pub stop_reason: String,
}

impl fmt::Display for BedrockResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl ChatResponse for BedrockResponse {
    fn text(&self) -> Option<String> {
        Some(self.text.clone())
    }

    fn thinking(&self) -> Option<String> {
        self.thinking.clone()
    }

    fn usage(&self) -> Option<Usage> {
        self.usage.clone()
    }
}

#[async_trait]
impl ChatProvider for BedrockBackend {
    async fn chat(
        &self,
        messages: &[ChatMessage],
    ) -> std::result::Result<Box<dyn ChatResponse>, LLMError> {
        let response = self.converse(messages).await?;
        log::debug!("bedrock stop reason: {}", response.stop_reason);
        Ok(Box::new(response))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
