//! The one-node conversational graph: `START -> chatbot -> END`.
//!
//! A [`ChatGraph`] is compiled once at startup and shared read-only between
//! requests. Each invocation receives a fresh [`ConversationState`] and
//! returns it with exactly one assistant message appended.

mod builder;
mod compiled;
mod state;

pub use builder::{create_agent, GraphBuilder};
pub use compiled::{ChatGraph, CHATBOT_NODE, END, START};
pub use state::{ConversationState, Messages};
