//! # ledger-core: Pure Business Logic for Ledger POS
//!
//! This crate holds the ledger rules of the shop as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ledger POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Frontend (desktop webview / browser client)           │   │
//! │  │   Products ──► Customers ──► New Invoice ──► Receipt ──► Stats  │   │
//! │  └──────────────────────┬──────────────────────┬───────────────────┘   │
//! │                         │ IPC (stdio JSON)     │ HTTP (axum)           │
//! │  ┌──────────────────────▼──────────────────────▼───────────────────┐   │
//! │  │                    apps/pos commands                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ledger-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ numbering  │  │ analytics │  │ validation│  │   │
//! │  │   │  Invoice  │  │ SSS/MM/YY  │  │  rollups  │  │   rules   │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   ledger-db (Database Layer)                    │   │
//! │  │        SQLite queries, migrations, invoice transaction          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records (Product, Customer, Invoice, ...) and request shapes
//! - [`numbering`] - Month-scoped invoice number policy
//! - [`analytics`] - Time-windowed revenue rollups
//! - [`validation`] - Input validation before anything is written
//! - [`de`] - Lenient number decoding for client payloads
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ledger_core::numbering::NumberingScope;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
//! let scope = NumberingScope::for_date(date);
//!
//! assert_eq!(scope.next_number(None).unwrap(), "001/03/24");
//! assert_eq!(scope.next_number(Some("014/03/24")).unwrap(), "015/03/24");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod de;
pub mod error;
pub mod numbering;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use analytics::compute_analytics;
pub use error::{CoreError, CoreResult, ValidationError};
pub use numbering::NumberingScope;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of calendar months in the revenue chart series.
pub const MONTHLY_REVENUE_MONTHS: usize = 12;

/// Maximum product name length accepted from clients.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
