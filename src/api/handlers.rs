#[path = "handlers/chat.rs"]
mod chat;

#[path = "handlers/health.rs"]
mod health;

#[path = "handlers/helpers.rs"]
mod helpers;

pub use chat::handle_chat;
pub use health::handle_health;
pub use helpers::{internal_error, log_failure, ApiError, ApiResult};
