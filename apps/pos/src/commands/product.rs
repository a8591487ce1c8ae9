//! # Product Commands
//!
//! Catalogue maintenance: list, add, update, delete.

use chrono::Utc;
use tracing::{debug, info};

use crate::commands::SuccessResponse;
use crate::error::ApiError;
use crate::state::AppState;
use ledger_core::validation::validate_product;
use ledger_core::{Product, ProductInput};

/// All products, sorted by name.
pub async fn list_products(state: &AppState) -> Result<Vec<Product>, ApiError> {
    debug!("list_products command");
    Ok(state.db().products().list().await?)
}

/// Adds a product after validating name and rate.
pub async fn add_product(state: &AppState, input: ProductInput) -> Result<Product, ApiError> {
    debug!(name = %input.name, "add_product command");
    validate_product(&input)?;

    let product = state.db().products().create(&input, Utc::now()).await?;

    info!(id = product.id, name = %product.name, rate = product.rate, "Product added");
    Ok(product)
}

/// Replaces a product's name and rate. Past invoices keep the old rate.
pub async fn update_product(
    state: &AppState,
    id: i64,
    input: ProductInput,
) -> Result<Product, ApiError> {
    debug!(id, "update_product command");
    validate_product(&input)?;

    let product = state.db().products().update(id, &input, Utc::now()).await?;

    info!(id, name = %product.name, rate = product.rate, "Product updated");
    Ok(product)
}

pub async fn delete_product(state: &AppState, id: i64) -> Result<SuccessResponse, ApiError> {
    debug!(id, "delete_product command");
    state.db().products().delete(id).await?;

    info!(id, "Product deleted");
    Ok(SuccessResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::state;
    use crate::error::ErrorCode;

    fn input(name: &str, rate: f64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            rate,
        }
    }

    #[tokio::test]
    async fn test_add_list_update_delete() {
        let state = state().await;

        let p = add_product(&state, input("Groundnut Oil 1L", 180.0)).await.unwrap();
        let updated = update_product(&state, p.id, input("Groundnut Oil 1L", 175.0))
            .await
            .unwrap();
        assert_eq!(updated.rate, 175.0);

        assert_eq!(list_products(&state).await.unwrap(), vec![updated]);
        assert!(delete_product(&state, p.id).await.unwrap().success);
        assert!(list_products(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_product_rejected_before_write() {
        let state = state().await;

        let err = add_product(&state, input("", 10.0)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_product(&state, input("Ghee", -1.0)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(state.db().products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_and_missing() {
        let state = state().await;
        add_product(&state, input("Jaggery", 60.0)).await.unwrap();

        let err = add_product(&state, input("Jaggery", 65.0)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err = delete_product(&state, 42).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
