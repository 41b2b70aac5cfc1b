//! Status, config and health handlers

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use super::ApiState;
use crate::api::envelope::ApiResponse;
use crate::pipeline::PipelineStatus;

// ============================================================================
// Status Endpoint
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub uptime_secs: u64,
    #[serde(flatten)]
    pub pipeline: PipelineStatus,
}

/// GET /api/v1/status
pub async fn get_status(State(state): State<ApiState>) -> Response {
    ApiResponse::ok(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime_secs(),
        pipeline: state.pipeline.status(),
    })
}

/// GET /api/v1/config
pub async fn get_config(State(state): State<ApiState>) -> Response {
    ApiResponse::ok(state.config.as_ref())
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// Plain liveness payload (no envelope).
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub uptime_seconds: u64,
}

/// GET /health
pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_secs(),
    })
}
