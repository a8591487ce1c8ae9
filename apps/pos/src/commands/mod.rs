//! # Commands
//!
//! Transport-agnostic operations. HTTP routes and IPC channels are thin
//! adapters over these functions.
//!
//! ## Command Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/invoices ────────┐                                           │
//! │                             ├──► commands::invoice::create_invoice(     │
//! │  IPC "invoice:create" ──────┘        &AppState, NewInvoice)             │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                              Result<CreateInvoiceResponse, ApiError>    │
//! │                                          │                              │
//! │                         JSON body / IPC { "id", "ok" | "error" }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

pub mod analytics;
pub mod customer;
pub mod invoice;
pub mod product;
pub mod receipt;

/// Acknowledgement for deletes.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        SuccessResponse { success: true }
    }
}
