//! Single-turn chat backend on AWS Bedrock.
//!
//! A caller hands over the conversation so far; a one-node graph sends it to
//! the remote model and appends the reply. Two thin adapters expose this: an
//! HTTP API ([`api`]) that also strips inline reasoning from the answer, and a
//! managed-runtime entrypoint ([`runtime`]).

pub mod backends;
pub mod chat;
pub mod config;
pub mod error;
pub mod graph;
pub mod runtime;
pub mod sanitize;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "cli")]
pub mod logging;

pub use chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole};
pub use error::LLMError;
pub use graph::{create_agent, ChatGraph, ConversationState, GraphBuilder, Messages};
pub use sanitize::strip_reasoning;
