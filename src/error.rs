use thiserror::Error;

use crate::config::ConfigError;

/// Error types that can occur while running a conversation turn.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Invalid request parameters or format
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Errors returned by the remote model service
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// Model response could not be interpreted
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// Generic error
    #[error("Generic error: {0}")]
    Generic(String),
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl LLMError {
    /// Short variant name, used when logging failures at the API boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            LLMError::HttpError(_) => "HttpError",
            LLMError::AuthError(_) => "AuthError",
            LLMError::InvalidRequest(_) => "InvalidRequest",
            LLMError::ProviderError(_) => "ProviderError",
            LLMError::ResponseFormatError { .. } => "ResponseFormatError",
            LLMError::Generic(_) => "Generic",
            LLMError::JsonError(_) => "JsonError",
            LLMError::Config(_) => "Config",
        }
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}
