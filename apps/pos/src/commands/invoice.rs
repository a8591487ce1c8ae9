//! # Invoice Commands
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NewInvoice (JSON)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_new_invoice ── ValidationError ──► VALIDATION_ERROR (400)    │
//! │       │                                                                 │
//! │       ▼ InvoiceDraft                                                    │
//! │  db.invoices().create_invoice(draft, Local::now())                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  { "success": true, "invoice": { id, invoiceNumber, date, ... } }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::AppState;
use ledger_core::validation::validate_new_invoice;
use ledger_core::{Invoice, InvoiceWithDetails, NewInvoice};

/// Result of a successful invoice creation.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct CreateInvoiceResponse {
    pub success: bool,
    pub invoice: Invoice,
}

/// Creates an invoice dated now, numbered in the local calendar month.
pub async fn create_invoice(
    state: &AppState,
    request: NewInvoice,
) -> Result<CreateInvoiceResponse, ApiError> {
    create_invoice_at(state, request, &Local::now()).await
}

/// [`create_invoice`] with an explicit clock.
pub async fn create_invoice_at<Tz: TimeZone>(
    state: &AppState,
    request: NewInvoice,
    now: &DateTime<Tz>,
) -> Result<CreateInvoiceResponse, ApiError> {
    debug!(
        customer_id = ?request.customer_id,
        items = request.items.len(),
        "create_invoice command"
    );

    let draft = validate_new_invoice(request)?;
    let invoice = state.db().invoices().create_invoice(&draft, now).await?;

    info!(
        invoice_number = %invoice.invoice_number,
        total = invoice.total,
        "Invoice saved"
    );

    Ok(CreateInvoiceResponse {
        success: true,
        invoice,
    })
}

/// All invoices, newest first, with joined customer details and item names.
pub async fn list_invoices(state: &AppState) -> Result<Vec<InvoiceWithDetails>, ApiError> {
    debug!("list_invoices command");
    Ok(state.db().invoices().list_with_details().await?)
}

pub async fn get_invoice(state: &AppState, id: i64) -> Result<InvoiceWithDetails, ApiError> {
    debug!(id, "get_invoice command");
    state
        .db()
        .invoices()
        .get_with_details(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Invoice", id))
}
