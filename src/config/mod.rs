//! Agent and server configuration.
//!
//! Values come from three places, later ones winning: built-in defaults, an
//! optional TOML file, and the process environment.

mod error;
mod load;
mod types;

pub use error::ConfigError;
pub use load::load_config;
pub use types::{
    AgentConfig, LoggingConfig, ServerConfig, DEFAULT_AGENTCORE_PORT, DEFAULT_CORS_ORIGINS,
    DEFAULT_HOST, DEFAULT_MAX_TOKENS, DEFAULT_MODEL_ID, DEFAULT_PORT, DEFAULT_REGION,
    DEFAULT_TEMPERATURE, ENV_MODEL_ID, ENV_REGION,
};
