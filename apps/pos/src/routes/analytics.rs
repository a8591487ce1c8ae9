//! Dashboard analytics endpoint.

use axum::extract::State;
use axum::Json;

use crate::commands::analytics;
use crate::error::ApiError;
use crate::state::AppState;
use ledger_core::AnalyticsReport;

/// GET /api/analytics
pub async fn get(State(state): State<AppState>) -> Result<Json<AnalyticsReport>, ApiError> {
    Ok(Json(analytics::get_analytics(&state).await?))
}
