//! # Receipt Rendering
//!
//! Turns an invoice into a self-contained HTML page sized for a thermal
//! roll. The host (webview print dialog or browser) does the actual printing.
//!
//! ## Layout
//! ```text
//! ┌──────────────────────────────┐
//! │        Your Shop Name        │  store header
//! │  123, Shop Street, City      │
//! │  Phone: +91 1234567890       │
//! │  Invoice #: 001/03/24        │
//! │  Date: 09/03/2024            │
//! ├──────────────────────────────┤
//! │  Bill To: name/mobile/addr   │
//! ├──────────────────────────────┤
//! │  Item     Qty  Price  Amount │
//! │  Oil 1L     2  ₹50.00 ₹100.00│
//! ├──────────────────────────────┤
//! │              Total: ₹100.00  │
//! │  Terms & Conditions          │
//! │  Thank you for your business!│
//! └──────────────────────────────┘
//! ```

use chrono::{Local, TimeZone};

use crate::state::ConfigState;
use ledger_core::InvoiceWithDetails;

const PLACEHOLDER: &str = "-";

const TERMS: [&str; 2] = [
    "Goods once sold cannot be returned",
    "All disputes are subject to local jurisdiction",
];

const STYLE: &str = "\
body { font-family: 'Courier New', monospace; font-size: 10px; margin: 0; padding: 2mm; }
.center { text-align: center; }
.header h1 { font-size: 14px; margin: 0 0 2px; }
.header p, .bill-to p, .terms p { margin: 1px 0; }
.divider { border-top: 1px dashed #000; margin: 4px 0; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 1px 0; text-align: left; }
th.num, td.num { text-align: right; }
.total { text-align: right; font-weight: bold; margin-top: 4px; }
.footer { text-align: center; margin-top: 6px; }
@media print { @page { margin: 0; } }";

/// Renders a receipt with dates shown in the local timezone.
pub fn render_receipt_html(invoice: &InvoiceWithDetails, config: &ConfigState) -> String {
    render_receipt_html_in(invoice, config, &Local)
}

/// [`render_receipt_html`] with an explicit timezone for the printed date.
pub fn render_receipt_html_in<Tz: TimeZone>(
    invoice: &InvoiceWithDetails,
    config: &ConfigState,
    tz: &Tz,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let date = invoice.date.with_timezone(tz).format("%d/%m/%Y").to_string();
    let customer = &invoice.customer_details;

    let mut html = String::with_capacity(4096);

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Invoice {number}</title>\n\
         <style>\n@page {{ size: {width}mm auto; }}\nbody {{ width: {width}mm; }}\n{style}\n</style>\n\
         </head>\n<body>\n",
        number = escape(&invoice.invoice_number),
        width = config.receipt_width_mm,
        style = STYLE,
    ));

    // Store header
    html.push_str("<div class=\"header center\">\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(&config.store_name)));
    for line in &config.store_address {
        html.push_str(&format!("<p>{}</p>\n", escape(line)));
    }
    html.push_str(&format!("<p>Phone: {}</p>\n", escape(&config.store_phone)));
    html.push_str(&format!(
        "<p>Invoice #: {}</p>\n<p>Date: {}</p>\n",
        escape(&invoice.invoice_number),
        date
    ));
    html.push_str("</div>\n<div class=\"divider\"></div>\n");

    // Bill To
    html.push_str(&format!(
        "<div class=\"bill-to\">\n<p><strong>Bill To:</strong></p>\n\
         <p>Name: {}</p>\n<p>Mobile: {}</p>\n<p>Address: {}</p>\n</div>\n",
        or_placeholder(customer.name.as_deref()),
        or_placeholder(customer.mobile.as_deref()),
        or_placeholder(customer.address.as_deref()),
    ));
    html.push_str("<div class=\"divider\"></div>\n");

    // Items
    html.push_str(
        "<table>\n<thead>\n<tr><th>Item</th><th class=\"num\">Qty</th>\
         <th class=\"num\">Price</th><th class=\"num\">Amount</th></tr>\n</thead>\n<tbody>\n",
    );
    for item in &invoice.items {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            or_placeholder(item.name.as_deref()),
            item.quantity,
            escape(&config.format_currency(item.rate)),
            escape(&config.format_currency(item.total)),
        ));
    }
    html.push_str("</tbody>\n</table>\n<div class=\"divider\"></div>\n");

    html.push_str(&format!(
        "<div class=\"total\">Total: {}</div>\n",
        escape(&config.format_currency(invoice.total))
    ));

    // Terms and footer
    html.push_str("<div class=\"terms\">\n<p><strong>Terms &amp; Conditions:</strong></p>\n");
    for (i, term) in TERMS.iter().enumerate() {
        html.push_str(&format!("<p>{}. {}</p>\n", i + 1, term));
    }
    html.push_str(
        "</div>\n<div class=\"footer\">\n<p>Thank you for your business!</p>\n\
         <p>Visit Again</p>\n</div>\n</body>\n</html>\n",
    );

    html
}

fn or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => escape(v),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Minimal HTML text escaping.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use ledger_core::{CustomerDetails, InvoiceItemDetails};

    fn invoice() -> InvoiceWithDetails {
        InvoiceWithDetails {
            id: 1,
            invoice_number: "001/03/24".to_string(),
            date: Utc.with_ymd_and_hms(2024, 3, 9, 11, 0, 0).unwrap(),
            total: 100.0,
            customer_id: 7,
            customer_details: CustomerDetails {
                name: Some("Ravi <Kumar>".to_string()),
                mobile: Some("9876543210".to_string()),
                address: None,
            },
            items: vec![InvoiceItemDetails {
                id: 1,
                product_id: 3,
                name: Some("Oil & Ghee 1L".to_string()),
                quantity: 2,
                rate: 50.0,
                total: 100.0,
            }],
        }
    }

    #[test]
    fn test_receipt_contents() {
        let html = render_receipt_html_in(&invoice(), &ConfigState::default(), &Utc);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("width: 58mm"));
        assert!(html.contains("<h1>Your Shop Name</h1>"));
        assert!(html.contains("Invoice #: 001/03/24"));
        assert!(html.contains("Date: 09/03/2024"));
        assert!(html.contains("Mobile: 9876543210"));
        assert!(html.contains("<td class=\"num\">₹50.00</td>"));
        assert!(html.contains("Total: ₹100.00"));
        assert!(html.contains("Goods once sold cannot be returned"));
        assert!(html.contains("Thank you for your business!"));
    }

    #[test]
    fn test_document_is_complete_and_ordered() {
        let html = render_receipt_html_in(&invoice(), &ConfigState::default(), &Utc);

        let header = html.find("<h1>").unwrap();
        let bill_to = html.find("Bill To:").unwrap();
        let items = html.find("<tbody>").unwrap();
        let total = html.find("Total: ").unwrap();
        let footer = html.find("Visit Again").unwrap();
        assert!(header < bill_to && bill_to < items && items < total && total < footer);
        assert!(html.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render_receipt_html_in(&invoice(), &ConfigState::default(), &Utc);

        assert!(html.contains("Name: Ravi &lt;Kumar&gt;"));
        assert!(html.contains("<td>Oil &amp; Ghee 1L</td>"));
        assert!(!html.contains("<Kumar>"));
    }

    #[test]
    fn test_missing_names_render_placeholder() {
        let mut invoice = invoice();
        invoice.customer_details = CustomerDetails::default();
        invoice.items[0].name = None;

        let html = render_receipt_html_in(&invoice, &ConfigState::default(), &Utc);

        assert!(html.contains("Name: -"));
        assert!(html.contains("Address: -"));
        assert!(html.contains("<td>-</td>"));
    }

    #[test]
    fn test_date_follows_timezone() {
        let mut invoice = invoice();
        invoice.date = Utc.with_ymd_and_hms(2024, 3, 31, 20, 0, 0).unwrap();
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();

        let html = render_receipt_html_in(&invoice, &ConfigState::default(), &ist);
        assert!(html.contains("Date: 01/04/2024"));
    }

    #[test]
    fn test_store_config_applied() {
        let config = ConfigState {
            store_name: "Sri Lakshmi Oils".to_string(),
            store_address: vec!["Shop 4".to_string(), "Guntur".to_string()],
            receipt_width_mm: 80,
            ..ConfigState::default()
        };

        let html = render_receipt_html_in(&invoice(), &config, &Utc);
        assert!(html.contains("width: 80mm"));
        assert!(html.contains("<p>Shop 4</p>\n<p>Guntur</p>"));
    }
}
