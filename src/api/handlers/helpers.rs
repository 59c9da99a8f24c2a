use std::error::Error;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::types::ErrorResponse;
use crate::error::LLMError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Status code plus a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

pub fn internal_error(msg: impl Into<String>) -> ApiError {
    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        detail: msg.into(),
    }
}

/// Logs a failed turn: kind and message, then the debug form and source chain.
pub fn log_failure(err: &LLMError) {
    log::error!("[ERROR] {}: {}", err.kind(), err);
    let mut trace = format!("{err:?}");
    let mut source = err.source();
    while let Some(cause) = source {
        trace.push_str("\n  caused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }
    log::error!("{trace}");
}
