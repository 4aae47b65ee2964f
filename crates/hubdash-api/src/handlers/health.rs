use axum::{extract::State, Json};

use hubdash_core::domain::{LivenessReport, SystemReport};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /health` - always 200 while the process is serving.
pub async fn health_check(State(state): State<AppState>) -> Json<LivenessReport> {
    Json(state.health.liveness())
}

/// `GET /health/system`
pub async fn system_health(State(state): State<AppState>) -> Result<Json<SystemReport>, ApiError> {
    state
        .health
        .system_report()
        .await
        .map(Json)
        .map_err(|e| ApiError::SystemInfo(e.to_string()))
}
