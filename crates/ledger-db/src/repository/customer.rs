//! # Customer Repository
//!
//! CRUD for customers. Mobile numbers are unique.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{DbError, DbResult};
use ledger_core::{Customer, CustomerInput};

const CUSTOMER_COLUMNS: &str = "id, name, mobile, address, created_at, updated_at";

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
    write_gate: Arc<Mutex<()>>,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool, write_gate: Arc<Mutex<()>>) -> Self {
        CustomerRepository { pool, write_gate }
    }

    /// Lists all customers ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY name, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a customer and returns the stored row.
    pub async fn create(&self, input: &CustomerInput, now: DateTime<Utc>) -> DbResult<Customer> {
        debug!(name = %input.name, "Creating customer");
        let _gate = self.write_gate.lock().await;

        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (name, mobile, address, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(input.name.trim())
        .bind(input.mobile.trim())
        .bind(input.address.trim())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(input.mobile.trim()))?;

        Ok(customer)
    }

    /// Replaces a customer's details.
    pub async fn update(
        &self,
        id: i64,
        input: &CustomerInput,
        now: DateTime<Utc>,
    ) -> DbResult<Customer> {
        debug!(id, "Updating customer");
        let _gate = self.write_gate.lock().await;

        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers
            SET name = ?2, mobile = ?3, address = ?4, updated_at = ?5
            WHERE id = ?1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(input.name.trim())
        .bind(input.mobile.trim())
        .bind(input.address.trim())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(input.mobile.trim()))?;

        customer.ok_or_else(|| DbError::not_found("Customer", id))
    }

    /// Deletes a customer. Their invoices stay, with empty customer details.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting customer");
        let _gate = self.write_gate.lock().await;

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{customer, db};

    #[tokio::test]
    async fn test_create_trims_and_returns_row() {
        let db = db().await;
        let input = CustomerInput {
            name: "  Ravi Kumar ".to_string(),
            mobile: "9876543210".to_string(),
            address: String::new(),
        };

        let c = db.customers().create(&input, Utc::now()).await.unwrap();
        assert_eq!(c.name, "Ravi Kumar");
        assert_eq!(c.address, "");
        assert_eq!(db.customers().get_by_id(c.id).await.unwrap(), Some(c));
    }

    #[tokio::test]
    async fn test_duplicate_mobile_rejected() {
        let db = db().await;
        customer(&db, "Asha", "9000000001").await;

        let input = CustomerInput {
            name: "Someone Else".to_string(),
            mobile: "9000000001".to_string(),
            address: String::new(),
        };
        let err = db.customers().create(&input, Utc::now()).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::UniqueViolation { ref value, .. } if value == "9000000001"
        ));
    }

    #[tokio::test]
    async fn test_update_delete_and_count() {
        let db = db().await;
        let c = customer(&db, "Asha", "9000000001").await;
        customer(&db, "Bilal", "9000000002").await;

        let input = CustomerInput {
            name: "Asha R".to_string(),
            mobile: "9000000001".to_string(),
            address: "Shop 4".to_string(),
        };
        let updated = db.customers().update(c.id, &input, Utc::now()).await.unwrap();
        assert_eq!(updated.address, "Shop 4");

        db.customers().delete(c.id).await.unwrap();
        assert_eq!(db.customers().count().await.unwrap(), 1);

        let err = db.customers().delete(c.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
