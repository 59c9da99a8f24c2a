//! HTTP interface: `POST /api/chat` and `GET /health`.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::DEFAULT_CORS_ORIGINS;
use crate::error::LLMError;
use crate::graph::ChatGraph;

mod handlers;
pub mod types;

pub use handlers::{handle_chat, handle_health, internal_error, log_failure, ApiError, ApiResult};

/// Shared, read-only handler state. Lives for the whole process.
#[derive(Clone)]
pub struct ServerState {
    pub graph: Arc<ChatGraph>,
}

impl ServerState {
    pub fn new(graph: Arc<ChatGraph>) -> Self {
        Self { graph }
    }
}

/// Builds the application router with CORS restricted to `cors_origins`.
pub fn router(state: ServerState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/api/chat", post(handle_chat))
        .route("/health", get(handle_health))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// HTTP server wrapping the chat graph.
pub struct Server {
    state: ServerState,
    cors_origins: Vec<String>,
}

impl Server {
    pub fn new(graph: Arc<ChatGraph>) -> Self {
        Self {
            state: ServerState::new(graph),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    pub fn router(&self) -> Router {
        router(self.state.clone(), &self.cors_origins)
    }

    /// Serves until Ctrl-C.
    pub async fn run(self, addr: &str) -> Result<(), LLMError> {
        serve(self.router(), addr).await
    }
}

/// Binds `addr` and serves `app` until Ctrl-C.
pub async fn serve(app: Router, addr: &str) -> Result<(), LLMError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| LLMError::HttpError(format!("failed to bind {addr}: {e}")))?;
    log::info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| LLMError::HttpError(e.to_string()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        log::info!("shutdown signal received");
    }
}
