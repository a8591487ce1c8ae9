//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// GET /health
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if state.db().health_check().await {
        "ok"
    } else {
        tracing::warn!("Database health check failed");
        "unavailable"
    };

    Json(HealthResponse {
        status: "ok",
        database,
    })
}
