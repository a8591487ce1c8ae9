//! # Customer Commands

use chrono::Utc;
use tracing::{debug, info};

use crate::commands::SuccessResponse;
use crate::error::ApiError;
use crate::state::AppState;
use ledger_core::validation::validate_customer;
use ledger_core::{Customer, CustomerInput};

pub async fn list_customers(state: &AppState) -> Result<Vec<Customer>, ApiError> {
    debug!("list_customers command");
    Ok(state.db().customers().list().await?)
}

pub async fn add_customer(state: &AppState, input: CustomerInput) -> Result<Customer, ApiError> {
    debug!("add_customer command");
    validate_customer(&input)?;

    let customer = state.db().customers().create(&input, Utc::now()).await?;

    info!(id = customer.id, "Customer added");
    Ok(customer)
}

pub async fn update_customer(
    state: &AppState,
    id: i64,
    input: CustomerInput,
) -> Result<Customer, ApiError> {
    debug!(id, "update_customer command");
    validate_customer(&input)?;

    let customer = state.db().customers().update(id, &input, Utc::now()).await?;

    info!(id, "Customer updated");
    Ok(customer)
}

/// Deletes a customer. Their invoices remain, listed without customer details.
pub async fn delete_customer(state: &AppState, id: i64) -> Result<SuccessResponse, ApiError> {
    debug!(id, "delete_customer command");
    state.db().customers().delete(id).await?;

    info!(id, "Customer deleted");
    Ok(SuccessResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::state;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_customer_lifecycle() {
        let state = state().await;
        let input = CustomerInput {
            name: "Meena Iyer".to_string(),
            mobile: "9123456780".to_string(),
            address: String::new(),
        };

        let c = add_customer(&state, input.clone()).await.unwrap();
        assert_eq!(list_customers(&state).await.unwrap().len(), 1);

        let err = add_customer(&state, input).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);

        let moved = CustomerInput {
            name: "Meena Iyer".to_string(),
            mobile: "9123456780".to_string(),
            address: "7 Temple Street".to_string(),
        };
        let updated = update_customer(&state, c.id, moved).await.unwrap();
        assert_eq!(updated.address, "7 Temple Street");

        delete_customer(&state, c.id).await.unwrap();
        let err = update_customer(
            &state,
            c.id,
            CustomerInput {
                name: "x".to_string(),
                mobile: "1".to_string(),
                address: String::new(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_blank_mobile_rejected() {
        let state = state().await;
        let input = CustomerInput {
            name: "Walk-in".to_string(),
            mobile: " ".to_string(),
            address: String::new(),
        };

        let err = add_customer(&state, input).await.unwrap_err();
        assert_eq!(err.message, "mobile is required");
    }
}
