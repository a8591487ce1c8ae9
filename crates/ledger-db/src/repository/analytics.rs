//! # Analytics Repository
//!
//! Loads invoices, customers and products in one read transaction, then hands
//! them to [`ledger_core::analytics::compute_analytics`].

use chrono::{DateTime, TimeZone};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use ledger_core::{compute_analytics, AnalyticsReport, Customer, InvoiceHeader, Product};

/// Repository for the dashboard report.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    pool: SqlitePool,
}

impl AnalyticsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        AnalyticsRepository { pool }
    }

    /// Builds the report anchored on `now` from a consistent snapshot.
    pub async fn report<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DbResult<AnalyticsReport> {
        let mut tx = self.pool.begin().await?;

        let invoices = sqlx::query_as::<_, InvoiceHeader>(
            "SELECT id, invoice_number, date, total, customer_id FROM invoices",
        )
        .fetch_all(&mut *tx)
        .await?;

        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, mobile, address, created_at, updated_at FROM customers",
        )
        .fetch_all(&mut *tx)
        .await?;

        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, rate, created_at, updated_at FROM products",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            invoices = invoices.len(),
            customers = customers.len(),
            products = products.len(),
            "Computing analytics"
        );

        Ok(compute_analytics(&invoices, &customers, &products, now))
    }
}
