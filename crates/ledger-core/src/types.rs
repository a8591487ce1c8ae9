//! # Domain Types
//!
//! Records persisted by the store and the request shapes callers submit.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │      Invoice        │   │    Customer     │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  id (i64)       │   │  id (i64)           │   │  id (i64)       │   │
//! │  │  name (unique)  │   │  invoice_number     │◄──│  name           │   │
//! │  │  rate           │   │  date, total        │   │  mobile (unique)│   │
//! │  └────────▲────────┘   │  customer_id ───────┼──►│  address        │   │
//! │           │            │  items ◆            │   └─────────────────┘   │
//! │           │            └─────────┬───────────┘                         │
//! │           │                      ◆ owns                                │
//! │  ┌────────┴──────────────────────▼───────────┐                         │
//! │  │            InvoiceLineItem                │                         │
//! │  │  product_id (non-owning), quantity,       │                         │
//! │  │  rate (snapshot), total                   │                         │
//! │  └───────────────────────────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! All types serialize with camelCase keys (`invoiceNumber`, `customerId`)
//! because that is what the existing web and desktop clients read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::de;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Store-assigned identity.
    pub id: i64,

    /// Display name, unique across products.
    pub name: String,

    /// Current selling rate. Line items snapshot this at sale time.
    pub rate: f64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductInput {
    pub name: String,
    #[serde(deserialize_with = "de::decimal")]
    pub rate: f64,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer, keyed for contact purposes by mobile number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Unique across customers.
    pub mobile: String,
    pub address: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerInput {
    pub name: String,
    pub mobile: String,
    #[serde(default)]
    pub address: String,
}

// =============================================================================
// Invoice
// =============================================================================

/// Invoice header row as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceHeader {
    pub id: i64,
    /// `SSS/MM/YY`, see [`crate::numbering`].
    pub invoice_number: String,
    /// Creation instant; never changes afterwards.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    /// Caller-supplied total. Trusted as given, never recomputed.
    pub total: f64,
    pub customer_id: i64,
}

/// A line item owned by an invoice.
///
/// Uses the snapshot pattern: `rate` is the price at the time of sale and
/// may differ from the product's current rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceLineItem {
    pub id: i64,
    pub invoice_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub rate: f64,
    /// Expected to equal `quantity × rate`; stored as submitted.
    pub total: f64,
}

/// A persisted invoice together with its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub total: f64,
    pub customer_id: i64,
    pub items: Vec<InvoiceLineItem>,
}

impl Invoice {
    /// Joins a header with its items.
    pub fn from_parts(header: InvoiceHeader, items: Vec<InvoiceLineItem>) -> Self {
        Invoice {
            id: header.id,
            invoice_number: header.invoice_number,
            date: header.date,
            total: header.total,
            customer_id: header.customer_id,
            items,
        }
    }
}

// =============================================================================
// Invoice Creation Request
// =============================================================================

/// Invoice creation request as submitted by a client.
///
/// `customer_id` is optional here only so that a missing id surfaces as a
/// validation error instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewInvoice {
    #[serde(default, deserialize_with = "de::optional_integer")]
    pub customer_id: Option<i64>,
    #[serde(deserialize_with = "de::decimal")]
    pub total: f64,
    #[serde(default)]
    pub items: Vec<NewInvoiceItem>,
}

/// One requested line. Clients built around the cart send the product id as
/// `id`, so that key is accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewInvoiceItem {
    #[serde(alias = "id", deserialize_with = "de::integer")]
    pub product_id: i64,
    #[serde(deserialize_with = "de::integer")]
    pub quantity: i64,
    #[serde(deserialize_with = "de::decimal")]
    pub rate: f64,
    #[serde(deserialize_with = "de::decimal")]
    pub total: f64,
}

/// A validated invoice request, ready for the transaction manager.
///
/// Produced by [`crate::validation::validate_new_invoice`].
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub customer_id: i64,
    pub total: f64,
    pub items: Vec<NewInvoiceItem>,
}

// =============================================================================
// Invoice Listing Projection
// =============================================================================

/// Customer fields joined onto an invoice at query time.
///
/// All optional: the customer may have been deleted since the sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
}

/// A line item with the product name joined at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceItemDetails {
    pub id: i64,
    pub product_id: i64,
    pub name: Option<String>,
    pub quantity: i64,
    pub rate: f64,
    pub total: f64,
}

/// Read-only listing projection of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceWithDetails {
    pub id: i64,
    pub invoice_number: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub total: f64,
    pub customer_id: i64,
    pub customer_details: CustomerDetails,
    pub items: Vec<InvoiceItemDetails>,
}

// =============================================================================
// Analytics
// =============================================================================

/// Revenue of one calendar month in the chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MonthlyRevenue {
    /// Short month name, e.g. `Mar`.
    pub month: String,
    pub revenue: f64,
}

/// Fixed-shape dashboard report. See [`crate::analytics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AnalyticsReport {
    pub current_month_revenue: f64,
    pub last_month_revenue: f64,
    pub current_year_revenue: f64,
    pub last_year_revenue: f64,
    pub total_customers: usize,
    pub new_customers_this_month: usize,
    pub total_products: usize,
    /// Twelve entries, oldest first, ending at the current month.
    pub monthly_revenue: Vec<MonthlyRevenue>,
}

// =============================================================================
// Unit Tests
// =============================================================================
