//! Health check handlers
//!
//! Endpoints for liveness and readiness checks, plus the root banner.

use axum::{extract::State, http::StatusCode, Json};
use band_service::dto::{HealthResponse, ReadinessResponse};
use serde_json::{json, Value};

use crate::state::AppState;

/// Service banner
///
/// GET /
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": state.config().app.name,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Basic health check (liveness check)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = state.pool().acquire().await.is_ok();

    let response = ReadinessResponse::ready(db_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
