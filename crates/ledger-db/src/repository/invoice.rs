//! # Invoice Repository
//!
//! The invoice transaction and the read-side listing projection.
//!
//! ## Creating an Invoice
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_invoice(draft, now)                           │
//! │                                                                         │
//! │  1. acquire write gate                                                 │
//! │  2. BEGIN                                                              │
//! │  3. last number in scope  ── LIKE '%/MM/YY' ORDER BY id DESC LIMIT 1   │
//! │  4. next number           ── ledger_core::numbering                    │
//! │  5. INSERT invoices       ── new id from last_insert_rowid             │
//! │  6. INSERT invoice_items  ── one per draft item, in order              │
//! │  7. COMMIT                                                             │
//! │                                                                         │
//! │  Any failure in 3-7 ──► ROLLBACK, nothing is visible, no number used   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line items reference products by id only; no check is made that the
//! product exists, and the submitted rate is stored as the sale-time snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use ledger_core::{
    CustomerDetails, Invoice, InvoiceDraft, InvoiceHeader, InvoiceItemDetails, InvoiceLineItem,
    InvoiceWithDetails, NumberingScope,
};

/// Invoice header joined with whatever is left of its customer.
#[derive(Debug, sqlx::FromRow)]
struct InvoiceListingRow {
    id: i64,
    invoice_number: String,
    date: DateTime<Utc>,
    total: f64,
    customer_id: i64,
    customer_name: Option<String>,
    customer_mobile: Option<String>,
    customer_address: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct ItemDetailsRow {
    invoice_id: i64,
    #[sqlx(flatten)]
    details: InvoiceItemDetails,
}

const LISTING_SELECT: &str = r#"
    SELECT
        i.id,
        i.invoice_number,
        i.date,
        i.total,
        i.customer_id,
        c.name    AS customer_name,
        c.mobile  AS customer_mobile,
        c.address AS customer_address
    FROM invoices i
    LEFT JOIN customers c ON c.id = i.customer_id
"#;

const ITEM_DETAILS_SELECT: &str = r#"
    SELECT
        ii.invoice_id,
        ii.id,
        ii.product_id,
        p.name,
        ii.quantity,
        ii.rate,
        ii.total
    FROM invoice_items ii
    LEFT JOIN products p ON p.id = ii.product_id
"#;

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
    write_gate: Arc<Mutex<()>>,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository. `write_gate` must be shared by every
    /// repository writing to the same database.
    pub fn new(pool: SqlitePool, write_gate: Arc<Mutex<()>>) -> Self {
        InvoiceRepository { pool, write_gate }
    }

    // =========================================================================
    // Write Side
    // =========================================================================

    /// Creates an invoice with all its line items as one atomic unit.
    ///
    /// `now` becomes the invoice date, and its calendar (month and year in
    /// the time zone of `now`) picks the numbering scope.
    ///
    /// ## Returns
    /// The stored invoice, items in submission order with their new ids.
    ///
    /// ## Errors
    /// Any storage or numbering failure rolls the whole invoice back.
    pub async fn create_invoice<Tz: TimeZone>(
        &self,
        draft: &InvoiceDraft,
        now: &DateTime<Tz>,
    ) -> DbResult<Invoice> {
        let scope = NumberingScope::for_date(now.date_naive());
        let date = now.with_timezone(&Utc);

        let _gate = self.write_gate.lock().await;

        let mut tx = self.pool.begin().await?;

        match insert_invoice(&mut *tx, scope, draft, date).await {
            Ok(invoice) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

                info!(
                    id = invoice.id,
                    invoice_number = %invoice.invoice_number,
                    customer_id = invoice.customer_id,
                    items = invoice.items.len(),
                    total = invoice.total,
                    "Invoice created"
                );
                Ok(invoice)
            }
            Err(err) => {
                warn!(error = %err, scope = %scope.suffix(), "Invoice creation rolled back");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    // =========================================================================
    // Read Side
    // =========================================================================

    /// All invoices, newest first, with customer details and named items.
    pub async fn list_with_details(&self) -> DbResult<Vec<InvoiceWithDetails>> {
        let headers = sqlx::query_as::<_, InvoiceListingRow>(&format!(
            "{LISTING_SELECT} ORDER BY i.date DESC, i.id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let item_rows = sqlx::query_as::<_, ItemDetailsRow>(&format!(
            "{ITEM_DETAILS_SELECT} ORDER BY ii.invoice_id, ii.id"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_invoice: HashMap<i64, Vec<InvoiceItemDetails>> = HashMap::new();
        for row in item_rows {
            items_by_invoice
                .entry(row.invoice_id)
                .or_default()
                .push(row.details);
        }

        let invoices: Vec<InvoiceWithDetails> = headers
            .into_iter()
            .map(|row| {
                let items = items_by_invoice.remove(&row.id).unwrap_or_default();
                with_details(row, items)
            })
            .collect();

        debug!(count = invoices.len(), "Listed invoices");
        Ok(invoices)
    }

    /// One invoice in the listing projection.
    pub async fn get_with_details(&self, id: i64) -> DbResult<Option<InvoiceWithDetails>> {
        let header = sqlx::query_as::<_, InvoiceListingRow>(&format!(
            "{LISTING_SELECT} WHERE i.id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, ItemDetailsRow>(&format!(
            "{ITEM_DETAILS_SELECT} WHERE ii.invoice_id = ?1 ORDER BY ii.id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|row| row.details)
        .collect();

        Ok(Some(with_details(header, items)))
    }

    /// One invoice as stored.
    pub async fn get(&self, id: i64) -> DbResult<Option<Invoice>> {
        let header = sqlx::query_as::<_, InvoiceHeader>(
            "SELECT id, invoice_number, date, total, customer_id FROM invoices WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, InvoiceLineItem>(
            r#"
            SELECT id, invoice_id, product_id, quantity, rate, total
            FROM invoice_items
            WHERE invoice_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Invoice::from_parts(header, items)))
    }

    /// Counts invoice headers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts line items across all invoices.
    pub async fn count_items(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoice_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Steps 3-6 of the invoice transaction, on the transaction's connection.
async fn insert_invoice(
    conn: &mut SqliteConnection,
    scope: NumberingScope,
    draft: &InvoiceDraft,
    date: DateTime<Utc>,
) -> DbResult<Invoice> {
    let last_number: Option<String> = sqlx::query_scalar(
        r#"
        SELECT invoice_number
        FROM invoices
        WHERE invoice_number LIKE ?1
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .bind(scope.like_pattern())
    .fetch_optional(&mut *conn)
    .await?;

    let invoice_number = scope.next_number(last_number.as_deref())?;

    debug!(
        invoice_number = %invoice_number,
        previous = ?last_number,
        "Derived invoice number"
    );

    let invoice_id = sqlx::query(
        r#"
        INSERT INTO invoices (invoice_number, date, total, customer_id)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&invoice_number)
    .bind(date)
    .bind(draft.total)
    .bind(draft.customer_id)
    .execute(&mut *conn)
    .await
    .map_err(|e| DbError::from(e).with_duplicate_value(invoice_number.as_str()))?
    .last_insert_rowid();

    let mut items = Vec::with_capacity(draft.items.len());
    for item in &draft.items {
        let item_id = sqlx::query(
            r#"
            INSERT INTO invoice_items (invoice_id, product_id, quantity, rate, total)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(invoice_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.rate)
        .bind(item.total)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

        items.push(InvoiceLineItem {
            id: item_id,
            invoice_id,
            product_id: item.product_id,
            quantity: item.quantity,
            rate: item.rate,
            total: item.total,
        });
    }

    Ok(Invoice {
        id: invoice_id,
        invoice_number,
        date,
        total: draft.total,
        customer_id: draft.customer_id,
        items,
    })
}

fn with_details(row: InvoiceListingRow, items: Vec<InvoiceItemDetails>) -> InvoiceWithDetails {
    InvoiceWithDetails {
        id: row.id,
        invoice_number: row.invoice_number,
        date: row.date,
        total: row.total,
        customer_id: row.customer_id,
        customer_details: CustomerDetails {
            name: row.customer_name,
            mobile: row.customer_mobile,
            address: row.customer_address,
        },
        items,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{customer, db, product, TempDbFile};
    use chrono::{Duration, FixedOffset};
    use ledger_core::{CoreError, NewInvoiceItem};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    fn line(product_id: i64, quantity: i64, rate: f64) -> NewInvoiceItem {
        NewInvoiceItem {
            product_id,
            quantity,
            rate,
            total: quantity as f64 * rate,
        }
    }

    fn draft(customer_id: i64, items: Vec<NewInvoiceItem>) -> InvoiceDraft {
        InvoiceDraft {
            customer_id,
            total: items.iter().map(|i| i.total).sum(),
            items,
        }
    }

    #[tokio::test]
    async fn test_numbers_increase_within_month() {
        let db = db().await;
        let repo = db.invoices();
        let now = at(2024, 3, 9);

        let mut numbers = Vec::new();
        for _ in 0..3 {
            let inv = repo.create_invoice(&draft(1, vec![]), &now).await.unwrap();
            numbers.push(inv.invoice_number);
        }

        assert_eq!(numbers, vec!["001/03/24", "002/03/24", "003/03/24"]);
    }

    #[tokio::test]
    async fn test_new_month_restarts_sequence() {
        let db = db().await;
        let repo = db.invoices();

        let a = repo.create_invoice(&draft(1, vec![]), &at(2024, 3, 31)).await.unwrap();
        let b = repo.create_invoice(&draft(1, vec![]), &at(2024, 4, 1)).await.unwrap();
        let c = repo.create_invoice(&draft(1, vec![]), &at(2024, 3, 31)).await.unwrap();
        let d = repo.create_invoice(&draft(1, vec![]), &at(2025, 3, 1)).await.unwrap();

        assert_eq!(a.invoice_number, "001/03/24");
        assert_eq!(b.invoice_number, "001/04/24");
        assert_eq!(c.invoice_number, "002/03/24");
        assert_eq!(d.invoice_number, "001/03/25");
    }

    #[tokio::test]
    async fn test_scope_follows_calendar_of_now() {
        let db = db().await;
        // 2024-03-31 20:00 UTC is already April 1st in India.
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let now = at(2024, 3, 31).with_timezone(&ist) + Duration::hours(10);

        let inv = db.invoices().create_invoice(&draft(1, vec![]), &now).await.unwrap();

        assert_eq!(inv.invoice_number, "001/04/24");
        assert_eq!(inv.date, now.with_timezone(&Utc));
    }

    #[tokio::test]
    async fn test_create_returns_items_in_order() {
        let db = db().await;
        let c = customer(&db, "Asha", "9000000001").await;
        let p = product(&db, "Oil 1L", 50.0).await;

        let inv = db
            .invoices()
            .create_invoice(&draft(c.id, vec![line(p.id, 2, 50.0), line(999, 1, 5.0)]), &at(2024, 3, 9))
            .await
            .unwrap();

        assert_eq!(inv.customer_id, c.id);
        assert_eq!(inv.total, 105.0);
        assert_eq!(inv.items.len(), 2);
        assert_eq!(inv.items[0].product_id, p.id);
        assert_eq!(inv.items[1].product_id, 999);
        assert!(inv.items.iter().all(|i| i.invoice_id == inv.id));

        let stored = db.invoices().get(inv.id).await.unwrap().unwrap();
        assert_eq!(stored, inv);
    }

    #[tokio::test]
    async fn test_failed_item_rolls_back_everything() {
        let db = db().await;
        let repo = db.invoices();
        let now = at(2024, 3, 9);

        // Zero quantity passes the draft but trips the CHECK constraint.
        let bad = draft(1, vec![line(1, 1, 10.0), line(2, 0, 10.0)]);
        let err = repo.create_invoice(&bad, &now).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));

        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(repo.count_items().await.unwrap(), 0);

        let next = repo.create_invoice(&draft(1, vec![]), &now).await.unwrap();
        assert_eq!(next.invoice_number, "001/03/24");
    }

    #[tokio::test]
    async fn test_malformed_last_number_aborts() {
        let db = db().await;
        sqlx::query(
            "INSERT INTO invoices (invoice_number, date, total, customer_id) VALUES ('X1/03/24', ?1, 0, 1)",
        )
        .bind(at(2024, 3, 1))
        .execute(db.pool())
        .await
        .unwrap();

        let err = db
            .invoices()
            .create_invoice(&draft(1, vec![]), &at(2024, 3, 9))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Core(CoreError::MalformedInvoiceNumber(_))));
        assert_eq!(db.invoices().count().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_numbers() {
        let db = db().await;
        let now = at(2024, 3, 9);

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let repo = db.invoices();
                tokio::spawn(async move { repo.create_invoice(&draft(1, vec![]), &now).await })
            })
            .collect();

        let mut numbers = Vec::new();
        for handle in handles {
            numbers.push(handle.await.unwrap().unwrap().invoice_number);
        }
        numbers.sort();
        numbers.dedup();

        assert_eq!(numbers.len(), 20);
        assert_eq!(numbers.first().map(String::as_str), Some("001/03/24"));
        assert_eq!(numbers.last().map(String::as_str), Some("020/03/24"));
    }

    #[tokio::test]
    async fn test_list_with_details_joins_customer_and_product() {
        let db = db().await;
        let asha = customer(&db, "Asha", "9000000001").await;
        let oil = product(&db, "Oil 1L", 50.0).await;
        let repo = db.invoices();

        let first = repo
            .create_invoice(&draft(asha.id, vec![line(oil.id, 2, 50.0)]), &at(2024, 3, 1))
            .await
            .unwrap();
        let second = repo
            .create_invoice(&draft(404, vec![line(777, 1, 9.5)]), &at(2024, 3, 2))
            .await
            .unwrap();

        let listed = repo.list_with_details().await.unwrap();
        assert_eq!(listed.len(), 2);

        // Newest first.
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[0].customer_details, CustomerDetails::default());
        assert_eq!(listed[0].items[0].name, None);
        assert_eq!(listed[0].items[0].rate, 9.5);

        assert_eq!(listed[1].id, first.id);
        assert_eq!(listed[1].customer_details.name.as_deref(), Some("Asha"));
        assert_eq!(listed[1].customer_details.mobile.as_deref(), Some("9000000001"));
        assert_eq!(listed[1].items[0].name.as_deref(), Some("Oil 1L"));
        assert_eq!(listed[1].items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_snapshot_rate_survives_product_changes() {
        let db = db().await;
        let oil = product(&db, "Oil 1L", 50.0).await;
        let inv = db
            .invoices()
            .create_invoice(&draft(1, vec![line(oil.id, 1, 50.0)]), &at(2024, 3, 1))
            .await
            .unwrap();

        let input = ledger_core::ProductInput {
            name: "Oil 1L".to_string(),
            rate: 65.0,
        };
        db.products().update(oil.id, &input, Utc::now()).await.unwrap();
        db.products().delete(oil.id).await.unwrap();

        let details = db.invoices().get_with_details(inv.id).await.unwrap().unwrap();
        assert_eq!(details.items[0].rate, 50.0);
        assert_eq!(details.items[0].product_id, oil.id);
        assert_eq!(details.items[0].name, None);
    }

    #[tokio::test]
    async fn test_get_missing_invoice() {
        let db = db().await;
        assert!(db.invoices().get(1).await.unwrap().is_none());
        assert!(db.invoices().get_with_details(1).await.unwrap().is_none());
    }
    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_mixed_writers_on_file_database() {
        let file = TempDbFile::new("mixed-writers");
        let db = file.open().await;
        let now = at(2024, 3, 9);

        let handles: Vec<_> = (0..400)
            .map(|n| {
                let db = db.clone();
                tokio::spawn(async move {
                    if n % 2 == 0 {
                        db.invoices()
                            .create_invoice(&draft(1, vec![line(1, 1, 10.0)]), &now)
                            .await
                            .map(|_| ())
                    } else {
                        let input = ledger_core::ProductInput {
                            name: format!("Item {n}"),
                            rate: 10.0,
                        };
                        db.products().create(&input, Utc::now()).await.map(|_| ())
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(db.invoices().count().await.unwrap(), 200);
        assert_eq!(db.products().count().await.unwrap(), 200);

        let mut numbers: Vec<String> = db
            .invoices()
            .list_with_details()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.invoice_number)
            .collect();
        numbers.sort();
        numbers.dedup();
        assert_eq!(numbers.len(), 200);
        assert_eq!(numbers.last().map(String::as_str), Some("200/03/24"));

        db.close().await;
    }

    #[tokio::test]
    async fn test_invoices_survive_reopen() {
        let file = TempDbFile::new("reopen");
        let now = at(2024, 3, 9);

        let db = file.open().await;
        let first = db
            .invoices()
            .create_invoice(&draft(7, vec![line(3, 2, 50.0)]), &now)
            .await
            .unwrap();
        db.close().await;

        let db = file.open().await;
        let listed = db.invoices().list_with_details().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[0].invoice_number, "001/03/24");
        assert_eq!(listed[0].items.len(), 1);
        assert_eq!(listed[0].items[0].quantity, 2);

        let second = db
            .invoices()
            .create_invoice(&draft(7, vec![]), &now)
            .await
            .unwrap();
        assert_eq!(second.invoice_number, "002/03/24");

        db.close().await;
    }
}
