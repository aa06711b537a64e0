use axum::Json;
use axum::response::IntoResponse;
use serde_json::json;

/// Root endpoint (GET /)
pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "PDF Merger API is running" }))
}

/// Health check endpoint (liveness)
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}
