use std::sync::Arc;

use crate::chat::ChatProvider;
use crate::config::AgentConfig;
use crate::error::LLMError;

use super::compiled::ChatGraph;

/// Builder for [`ChatGraph`].
///
/// Starts from [`AgentConfig::from_env`]; explicit setters take precedence.
/// Supplying a provider skips construction of the Bedrock client entirely.
pub struct GraphBuilder {
    config: AgentConfig,
    provider: Option<Arc<dyn ChatProvider>>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::from_config(AgentConfig::from_env())
    }

    pub fn from_config(config: AgentConfig) -> Self {
        Self {
            config,
            provider: None,
        }
    }

    pub fn model_id(mut self, model_id: impl Into<String>) -> Self {
        self.config.model_id = model_id.into();
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = region.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Use an already constructed remote model instead of Bedrock.
    pub fn provider(mut self, provider: Arc<dyn ChatProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn build(self) -> Result<ChatGraph, LLMError> {
        if let Some(provider) = self.provider {
            return Ok(ChatGraph::new(provider));
        }
        build_bedrock(self.config)
    }
}

#[cfg(feature = "bedrock")]
fn build_bedrock(config: AgentConfig) -> Result<ChatGraph, LLMError> {
    use crate::backends::aws::BedrockBackend;

    if config.model_id.trim().is_empty() {
        return Err(LLMError::InvalidRequest("model id must not be empty".to_string()));
    }
    if config.region.trim().is_empty() {
        return Err(LLMError::InvalidRequest("region must not be empty".to_string()));
    }
    log::info!(
        "using Bedrock model {} in {} (temperature={}, max_tokens={})",
        config.model_id,
        config.region,
        config.temperature,
        config.max_tokens
    );
    let backend = BedrockBackend::new(config.region, config.model_id)
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens);
    Ok(ChatGraph::new(Arc::new(backend)))
}

#[cfg(not(feature = "bedrock"))]
fn build_bedrock(_config: AgentConfig) -> Result<ChatGraph, LLMError> {
    Err(LLMError::InvalidRequest(
        "no chat provider supplied and the `bedrock` feature is disabled".to_string(),
    ))
}

/// Builds the graph against Bedrock with the given model and region and the
/// default generation parameters.
pub fn create_agent(
    model_id: impl Into<String>,
    region: impl Into<String>,
) -> Result<ChatGraph, LLMError> {
    GraphBuilder::from_config(AgentConfig::default())
        .model_id(model_id)
        .region(region)
        .build()
}
