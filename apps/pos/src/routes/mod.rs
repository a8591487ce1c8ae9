//! # HTTP Routes
//!
//! Axum handlers for the web client. Each handler extracts [`AppState`]
//! and delegates to the matching command in [`crate::commands`].
//!
//! ```text
//! GET    /health
//! GET    /api/products            POST /api/products
//! PUT    /api/products/{id}       DELETE /api/products/{id}
//! GET    /api/customers           POST /api/customers
//! PUT    /api/customers/{id}      DELETE /api/customers/{id}
//! GET    /api/invoices            POST /api/invoices
//! GET    /api/invoices/{id}/receipt
//! GET    /api/analytics           (alias: /api/invoices/analytics)
//! ```
//!
//! [`AppState`]: crate::state::AppState

pub mod analytics;
pub mod customers;
pub mod health;
pub mod invoices;
pub mod products;
