use serde::{Deserialize, Serialize};

pub const ENV_MODEL_ID: &str = "BEDROCK_MODEL_ID";
pub const ENV_REGION: &str = "AWS_REGION";

pub const DEFAULT_MODEL_ID: &str = "openai.gpt-oss-120b-1:0";
pub const DEFAULT_REGION: &str = "ap-northeast-1";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8005;
pub const DEFAULT_AGENTCORE_PORT: u16 = 8080;
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:3001"];

/// Remote model settings shared by both entrypoints.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AgentConfig {
    pub model_id: String,
    pub region: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            region: DEFAULT_REGION.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl AgentConfig {
    /// Defaults overridden by `BEDROCK_MODEL_ID` and `AWS_REGION`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies model and region overrides from an arbitrary key lookup.
    ///
    /// Empty values are ignored so that `BEDROCK_MODEL_ID=` in a `.env` file
    /// does not blank out the default.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model_id) = lookup(ENV_MODEL_ID).filter(|v| !v.trim().is_empty()) {
            self.model_id = model_id;
        }
        if let Some(region) = lookup(ENV_REGION).filter(|v| !v.trim().is_empty()) {
            self.region = region;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub logging: LoggingConfig,
    pub agent: AgentConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            logging: LoggingConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
