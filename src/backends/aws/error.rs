//! Error types for the AWS Bedrock backend

use std::fmt;

use crate::error::LLMError;

/// Result type alias for Bedrock operations
pub type Result<T> = std::result::Result<T, BedrockError>;

/// Errors that can occur when using the Bedrock backend
#[derive(Debug)]
pub enum BedrockError {
    /// Invalid request parameters, unknown model id
    InvalidRequest(String),

    /// Invalid response from Bedrock
    InvalidResponse(String),

    /// Credentials missing or lacking access to the model
    AccessDenied(String),

    /// Request rejected by a quota or rate limit
    Throttled(String),

    /// Any other API or transport failure
    ApiError(String),
}

impl fmt::Display for BedrockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            Self::AccessDenied(msg) => write!(f, "Access denied: {}", msg),
            Self::Throttled(msg) => write!(f, "Throttled: {}", msg),
            Self::ApiError(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl std::error::Error for BedrockError {}

impl From<BedrockError> for LLMError {
    fn from(err: BedrockError) -> Self {
        match err {
            BedrockError::InvalidRequest(msg) => LLMError::InvalidRequest(msg),
            BedrockError::AccessDenied(msg) => LLMError::AuthError(msg),
            BedrockError::InvalidResponse(msg) => LLMError::ResponseFormatError {
                message: msg,
                raw_response: String::new(),
            },
            other => LLMError::ProviderError(other.to_string()),
        }
    }
}
