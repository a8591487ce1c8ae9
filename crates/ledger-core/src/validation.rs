//! # Input Validation
//!
//! Checks applied to client payloads before anything touches the store.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product    name non-blank, ≤ 200 chars │ rate finite, ≥ 0              │
//! │  Customer   name non-blank              │ mobile non-blank              │
//! │  Invoice    customerId present          │ total finite, ≥ 0             │
//! │  Line item  quantity > 0                │ rate, total finite, ≥ 0       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An invoice with no items is accepted.

use crate::error::ValidationError;
use crate::types::{CustomerInput, InvoiceDraft, NewInvoice, NewInvoiceItem, ProductInput};
use crate::MAX_PRODUCT_NAME_LEN;

/// Result alias for validators.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Checks
// =============================================================================

fn require_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

fn require_amount(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Validators
// =============================================================================

/// Validates a product create/update payload.
pub fn validate_product(input: &ProductInput) -> ValidationResult<()> {
    require_text("name", &input.name)?;
    if input.name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }
    require_amount("rate", input.rate)
}

/// Validates a customer create/update payload.
pub fn validate_customer(input: &CustomerInput) -> ValidationResult<()> {
    require_text("name", &input.name)?;
    require_text("mobile", &input.mobile)
}

fn validate_item(index: usize, item: &NewInvoiceItem) -> ValidationResult<()> {
    if item.quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: format!("items[{index}].quantity"),
        });
    }
    require_amount(&format!("items[{index}].rate"), item.rate)?;
    require_amount(&format!("items[{index}].total"), item.total)
}

/// Validates an invoice request and turns it into a draft.
///
/// The submitted `total` is kept as given even when it disagrees with the
/// line totals.
pub fn validate_new_invoice(request: NewInvoice) -> ValidationResult<InvoiceDraft> {
    let customer_id = request
        .customer_id
        .ok_or_else(|| ValidationError::required("customerId"))?;
    require_amount("total", request.total)?;

    for (index, item) in request.items.iter().enumerate() {
        validate_item(index, item)?;
    }

    Ok(InvoiceDraft {
        customer_id,
        total: request.total,
        items: request.items,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
