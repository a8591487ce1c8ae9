//! # Desktop IPC Host
//!
//! Line-delimited JSON over a byte stream (stdin/stdout for the desktop
//! shell). One request per line, one response per line, strictly in order.
//!
//! ## Envelope
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request   { "id": 7, "channel": "product:add",                         │
//! │              "payload": { "name": "Oil 1L", "rate": 150 } }             │
//! │                                                                         │
//! │  success   { "id": 7, "ok": { "id": 1, "name": "Oil 1L", ... } }        │
//! │  failure   { "id": 7, "error": { "code": "CONFLICT", "message": ... } } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Channels
//! | Channel                  | Payload            | Result                 |
//! |--------------------------|--------------------|------------------------|
//! | `product:getAll`         | -                  | `Product[]`            |
//! | `product:add`            | `ProductInput`     | `Product`              |
//! | `product:update`         | `{ id, data }`     | `Product`              |
//! | `product:delete`         | id                 | `{ success }`          |
//! | `customer:*`             | as for products    |                        |
//! | `invoice:getAll`         | -                  | `InvoiceWithDetails[]` |
//! | `invoice:create`         | `NewInvoice`       | `{ success, invoice }` |
//! | `invoice:renderReceipt`  | id                 | HTML string            |
//! | `analytics:get`          | -                  | `AnalyticsReport`      |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::commands::{analytics, customer, invoice, product, receipt};
use crate::error::ApiError;
use crate::state::AppState;
use ledger_core::{CustomerInput, ProductInput};

// =============================================================================
// Envelope Types
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct IpcRequest {
    /// Correlation id, echoed back unchanged.
    #[serde(default)]
    pub id: Value,
    pub channel: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct IpcResponse {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl IpcResponse {
    fn from_result(id: Value, result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(value) => IpcResponse {
                id,
                ok: Some(value),
                error: None,
            },
            Err(err) => IpcResponse {
                id,
                ok: None,
                error: Some(err),
            },
        }
    }
}

#[derive(Deserialize)]
struct UpdatePayload<T> {
    #[serde(default)]
    id: Value,
    data: T,
}

// =============================================================================
// Dispatch
// =============================================================================

/// Routes one channel call to its command.
pub async fn dispatch(state: &AppState, channel: &str, payload: Value) -> Result<Value, ApiError> {
    debug!(channel, "IPC request");

    match channel {
        "product:getAll" => to_value(product::list_products(state).await?),
        "product:add" => to_value(product::add_product(state, decode(payload)?).await?),
        "product:update" => {
            let update: UpdatePayload<ProductInput> = decode(payload)?;
            let id = require_id(&update.id, "Product")?;
            to_value(product::update_product(state, id, update.data).await?)
        }
        "product:delete" => {
            let id = require_id(&payload, "Product")?;
            to_value(product::delete_product(state, id).await?)
        }

        "customer:getAll" => to_value(customer::list_customers(state).await?),
        "customer:add" => to_value(customer::add_customer(state, decode(payload)?).await?),
        "customer:update" => {
            let update: UpdatePayload<CustomerInput> = decode(payload)?;
            let id = require_id(&update.id, "Customer")?;
            to_value(customer::update_customer(state, id, update.data).await?)
        }
        "customer:delete" => {
            let id = require_id(&payload, "Customer")?;
            to_value(customer::delete_customer(state, id).await?)
        }

        "invoice:getAll" => to_value(invoice::list_invoices(state).await?),
        "invoice:create" => to_value(invoice::create_invoice(state, decode(payload)?).await?),
        "invoice:renderReceipt" => {
            let id = require_id(&payload, "Invoice")?;
            Ok(Value::String(receipt::render_invoice_receipt(state, id).await?))
        }

        "analytics:get" => to_value(analytics::get_analytics(state).await?),

        other => Err(ApiError::validation(format!("Unknown channel: {}", other))),
    }
}

/// Handles one raw request line.
pub async fn handle_line(state: &AppState, line: &str) -> IpcResponse {
    match serde_json::from_str::<IpcRequest>(line) {
        Ok(request) => {
            let result = dispatch(state, &request.channel, request.payload).await;
            if let Err(err) = &result {
                debug!(channel = %request.channel, error = %err, "IPC request failed");
            }
            IpcResponse::from_result(request.id, result)
        }
        Err(e) => {
            warn!("Malformed IPC request: {}", e);
            IpcResponse::from_result(
                Value::Null,
                Err(ApiError::validation(format!("Malformed request: {}", e))),
            )
        }
    }
}

/// Serves requests until the reader reaches EOF.
pub async fn serve<R, W>(state: &AppState, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("IPC host ready");
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(state, &line).await;
        let mut encoded = serde_json::to_vec(&response)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        encoded.push(b'\n');

        writer.write_all(&encoded).await?;
        writer.flush().await?;
    }

    info!("IPC input closed");
    Ok(())
}

// =============================================================================
// Payload Helpers
// =============================================================================

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(payload).map_err(|e| ApiError::validation(e.to_string()))
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// Accepts a bare id (`12` or `"12"`) or an object carrying `id`.
fn require_id(value: &Value, entity: &str) -> Result<i64, ApiError> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) => map.get("id").and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }),
        _ => None,
    };

    id.ok_or_else(|| ApiError::validation(format!("{} ID is required", entity)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::state;
    use crate::error::ErrorCode;
    use serde_json::json;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn test_product_channels() {
        let state = state().await;

        let added = dispatch(&state, "product:add", json!({"name": "Rice 5kg", "rate": "320"}))
            .await
            .unwrap();
        let id = added["id"].as_i64().unwrap();
        assert_eq!(added["rate"], 320.0);

        let updated = dispatch(
            &state,
            "product:update",
            json!({"id": id, "data": {"name": "Rice 5kg", "rate": 310}}),
        )
        .await
        .unwrap();
        assert_eq!(updated["rate"], 310.0);

        let all = dispatch(&state, "product:getAll", Value::Null).await.unwrap();
        assert_eq!(all.as_array().unwrap().len(), 1);

        let deleted = dispatch(&state, "product:delete", json!(id)).await.unwrap();
        assert_eq!(deleted, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let state = state().await;

        let err = dispatch(
            &state,
            "product:update",
            json!({"data": {"name": "Rice", "rate": 1}}),
        )
        .await
        .unwrap_err();
        assert_eq!(err.message, "Product ID is required");

        let err = dispatch(&state, "customer:delete", Value::Null).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Customer ID is required");
    }

    #[tokio::test]
    async fn test_unknown_channel() {
        let state = state().await;
        let err = dispatch(&state, "stock:adjust", Value::Null).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_invoice_create_and_receipt() {
        let state = state().await;

        let created = dispatch(
            &state,
            "invoice:create",
            json!({"customerId": 7, "total": 100,
                   "items": [{"id": 3, "quantity": 2, "rate": 50, "total": 100}]}),
        )
        .await
        .unwrap();
        assert_eq!(created["success"], true);
        let id = created["invoice"]["id"].clone();

        let html = dispatch(&state, "invoice:renderReceipt", id).await.unwrap();
        assert!(html.as_str().unwrap().contains("Total: ₹100.00"));

        let report = dispatch(&state, "analytics:get", Value::Null).await.unwrap();
        assert_eq!(report["currentMonthRevenue"], 100.0);
    }

    #[tokio::test]
    async fn test_serve_echoes_ids_in_order() {
        let state = state().await;
        let input = concat!(
            r#"{"id": 1, "channel": "product:add", "payload": {"name": "Salt", "rate": 20}}"#,
            "\n\n",
            r#"{"id": "two", "channel": "product:add", "payload": {"name": "Salt", "rate": 22}}"#,
            "\n",
            "not json\n",
        );
        let mut output = Vec::new();

        serve(&state, BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["ok"]["name"], "Salt");
        assert!(responses[0].get("error").is_none());

        assert_eq!(responses[1]["id"], "two");
        assert_eq!(responses[1]["error"]["code"], "CONFLICT");
        assert!(responses[1].get("ok").is_none());

        assert_eq!(responses[2]["id"], Value::Null);
        assert_eq!(responses[2]["error"]["code"], "VALIDATION_ERROR");
    }
}
