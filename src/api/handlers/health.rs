use axum::Json;

use crate::api::types::HealthResponse;

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
