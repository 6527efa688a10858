//! Health and infrastructure handlers: probes and the metrics endpoint.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use super::state::SharedContext;
use crate::metrics;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub production: bool,
}

/// GET /health
pub async fn health(State(ctx): State<SharedContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        production: ctx.config.is_production,
    })
}

/// GET /health/live - process is up.
pub async fn health_live() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "alive",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// GET /health/ready - the archive database answers.
pub async fn health_ready(State(ctx): State<SharedContext>) -> (StatusCode, Json<serde_json::Value>) {
    match ctx.memory.ping() {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ready",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "not_ready",
                "error": e.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        ),
    }
}

/// GET /metrics - Prometheus text exposition.
pub async fn metrics_endpoint() -> Result<String, StatusCode> {
    metrics::render().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
