//! # Receipt Command

use tracing::debug;

use crate::commands::invoice::get_invoice;
use crate::error::ApiError;
use crate::receipt::render_receipt_html;
use crate::state::AppState;

/// Loads an invoice with its details and renders the printable receipt.
pub async fn render_invoice_receipt(state: &AppState, id: i64) -> Result<String, ApiError> {
    debug!(id, "render_invoice_receipt command");
    let invoice = get_invoice(state, id).await?;
    Ok(render_receipt_html(&invoice, state.config()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::invoice::create_invoice;
    use crate::commands::test_support::state;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use ledger_core::{CustomerInput, NewInvoice, NewInvoiceItem, ProductInput};

    #[tokio::test]
    async fn test_renders_saved_invoice() {
        let state = state().await;
        let product = state
            .db()
            .products()
            .create(
                &ProductInput {
                    name: "Sunflower Oil 1L".to_string(),
                    rate: 150.0,
                },
                Utc::now(),
            )
            .await
            .unwrap();
        let customer = state
            .db()
            .customers()
            .create(
                &CustomerInput {
                    name: "Anil".to_string(),
                    mobile: "9000000001".to_string(),
                    address: String::new(),
                },
                Utc::now(),
            )
            .await
            .unwrap();

        let created = create_invoice(
            &state,
            NewInvoice {
                customer_id: Some(customer.id),
                total: 300.0,
                items: vec![NewInvoiceItem {
                    product_id: product.id,
                    quantity: 2,
                    rate: 150.0,
                    total: 300.0,
                }],
            },
        )
        .await
        .unwrap();

        let html = render_invoice_receipt(&state, created.invoice.id).await.unwrap();

        assert!(html.contains(&created.invoice.invoice_number));
        assert!(html.contains("Sunflower Oil 1L"));
        assert!(html.contains("Name: Anil"));
        assert!(html.contains("Total: ₹300.00"));
    }

    #[tokio::test]
    async fn test_missing_invoice() {
        let state = state().await;
        let err = render_invoice_receipt(&state, 99).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
