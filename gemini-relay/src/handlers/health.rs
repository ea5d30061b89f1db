use axum::{response::IntoResponse, Json};
use serde_json::json;

pub const SERVICE_DISPLAY_NAME: &str = "Gemini Relay";

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": format!("{} is running.", SERVICE_DISPLAY_NAME) }))
}

/// Liveness only; upstream availability is deliberately not probed.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
