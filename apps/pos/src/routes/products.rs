//! Product catalogue endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::commands::{product, SuccessResponse};
use crate::error::ApiError;
use crate::state::AppState;
use ledger_core::{Product, ProductInput};

/// GET /api/products
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(product::list_products(&state).await?))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(input) = body?;
    let created = product::add_product(&state, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(input) = body?;
    Ok(Json(product::update_product(&state, id, input).await?))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(Json(product::delete_product(&state, id).await?))
}
