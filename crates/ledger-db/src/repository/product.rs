//! # Product Repository
//!
//! CRUD for the product catalogue. Names are unique; a duplicate name comes
//! back as [`DbError::UniqueViolation`] carrying the rejected name.
//!
//! Deleting a product leaves historical line items untouched: they keep the
//! product id and the rate they were sold at.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{DbError, DbResult};
use ledger_core::{Product, ProductInput};

const PRODUCT_COLUMNS: &str = "id, name, rate, created_at, updated_at";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    write_gate: Arc<Mutex<()>>,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool, write_gate: Arc<Mutex<()>>) -> Self {
        ProductRepository { pool, write_gate }
    }

    /// Lists all products ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a product and returns the stored row.
    pub async fn create(&self, input: &ProductInput, now: DateTime<Utc>) -> DbResult<Product> {
        debug!(name = %input.name, rate = input.rate, "Creating product");
        let _gate = self.write_gate.lock().await;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, rate, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(input.name.trim())
        .bind(input.rate)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(input.name.trim()))?;

        Ok(product)
    }

    /// Replaces a product's name and rate.
    ///
    /// Existing line items keep their snapshot rate.
    pub async fn update(
        &self,
        id: i64,
        input: &ProductInput,
        now: DateTime<Utc>,
    ) -> DbResult<Product> {
        debug!(id, name = %input.name, "Updating product");
        let _gate = self.write_gate.lock().await;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = ?2, rate = ?3, updated_at = ?4
            WHERE id = ?1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(input.name.trim())
        .bind(input.rate)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(input.name.trim()))?;

        product.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");
        let _gate = self.write_gate.lock().await;

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
