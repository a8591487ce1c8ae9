//! Invoice endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;

use crate::commands::invoice::{self, CreateInvoiceResponse};
use crate::commands::receipt;
use crate::error::ApiError;
use crate::state::AppState;
use ledger_core::{InvoiceWithDetails, NewInvoice};

/// GET /api/invoices
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<InvoiceWithDetails>>, ApiError> {
    Ok(Json(invoice::list_invoices(&state).await?))
}

/// POST /api/invoices
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewInvoice>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateInvoiceResponse>), ApiError> {
    let Json(request) = body?;
    let created = invoice::create_invoice(&state, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/invoices/{id}/receipt
pub async fn receipt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    Ok(Html(receipt::render_invoice_receipt(&state, id).await?))
}
