//! Customer endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::commands::{customer, SuccessResponse};
use crate::error::ApiError;
use crate::state::AppState;
use ledger_core::{Customer, CustomerInput};

/// GET /api/customers
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(customer::list_customers(&state).await?))
}

/// POST /api/customers
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let Json(input) = body?;
    let created = customer::add_customer(&state, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let Json(input) = body?;
    Ok(Json(customer::update_customer(&state, id, input).await?))
}

/// DELETE /api/customers/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(Json(customer::delete_customer(&state, id).await?))
}
