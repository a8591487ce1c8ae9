//! # Seed Data Generator
//!
//! Populates the database with a catalogue, customers and a spread of
//! invoices for development.
//!
//! ## Usage
//! ```bash
//! # 200 invoices (default)
//! cargo run -p ledger-db --bin seed
//!
//! # Custom amount and database path
//! cargo run -p ledger-db --bin seed -- --invoices 1000 --db ./data/ledger.db
//! ```
//!
//! ## Generated Data
//! - Products: staples in a few pack sizes, rates deterministic per index
//! - Customers: 25 walk-in regulars with unique mobiles
//! - Invoices: 1-4 lines each, dated across the last 14 months so every
//!   analytics window has data
//!
//! Everything is derived from the loop index, so two runs produce the same
//! data (apart from the dates, which are relative to today).

use chrono::{Duration, Local, Utc};
use std::env;

use ledger_core::validation::validate_new_invoice;
use ledger_core::{CustomerInput, NewInvoice, NewInvoiceItem, Product, ProductInput};
use ledger_db::{Database, DbConfig};

/// Base product names; each gets every size in [`SIZES`].
const STAPLES: &[(&str, f64)] = &[
    ("Basmati Rice", 95.0),
    ("Sona Masoori Rice", 62.0),
    ("Wheat Atta", 48.0),
    ("Toor Dal", 140.0),
    ("Moong Dal", 120.0),
    ("Sugar", 44.0),
    ("Iodised Salt", 22.0),
    ("Sunflower Oil", 155.0),
    ("Mustard Oil", 170.0),
    ("Tea Leaves", 480.0),
    ("Instant Coffee", 900.0),
    ("Turmeric Powder", 260.0),
    ("Red Chilli Powder", 300.0),
    ("Poha", 70.0),
    ("Besan", 110.0),
];

/// (label, multiplier on the per-kg/litre base rate)
const SIZES: &[(&str, f64)] = &[("500g", 0.5), ("1kg", 1.0), ("5kg", 4.8)];

const FIRST_NAMES: &[&str] = &[
    "Asha", "Ravi", "Meena", "Imran", "Lakshmi", "Suresh", "Farah", "Gopal", "Neha", "Arjun",
];
const LAST_NAMES: &[&str] = &["Sharma", "Khan", "Iyer", "Patel", "Das"];

const CUSTOMER_COUNT: usize = 25;

/// Invoices are spread over this many months back from today.
const HISTORY_MONTHS: i64 = 14;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut invoice_count: usize = 200;
    let mut db_path = String::from("./ledger_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--invoices" | "-n" => {
                if i + 1 < args.len() {
                    invoice_count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Ledger POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --invoices <N>  Number of invoices to generate (default: 200)");
                println!("  -d, --db <PATH>     Database file path (default: ./ledger_dev.db)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Ledger POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Invoices: {}", invoice_count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    // Products
    let mut products: Vec<Product> = Vec::new();
    for (name, base_rate) in STAPLES {
        for (size, factor) in SIZES {
            let input = ProductInput {
                name: format!("{} {}", name, size),
                rate: (base_rate * factor).round(),
            };
            products.push(db.products().create(&input, Utc::now()).await?);
        }
    }
    println!("✓ {} products", products.len());

    // Customers
    let mut customer_ids = Vec::with_capacity(CUSTOMER_COUNT);
    for n in 0..CUSTOMER_COUNT {
        let input = CustomerInput {
            name: format!(
                "{} {}",
                FIRST_NAMES[n % FIRST_NAMES.len()],
                LAST_NAMES[(n / FIRST_NAMES.len() + n) % LAST_NAMES.len()]
            ),
            mobile: format!("98{:08}", 10_000_000 + n * 7919),
            address: format!("{} Station Road", n + 1),
        };
        customer_ids.push(db.customers().create(&input, Utc::now()).await?.id);
    }
    println!("✓ {} customers", customer_ids.len());

    // Invoices, oldest first so numbers within a month follow the dates
    let now = Local::now();
    let span_days = HISTORY_MONTHS * 30;
    let mut created = 0;

    for n in 0..invoice_count {
        let days_back = span_days - (n as i64 * span_days) / invoice_count.max(1) as i64;
        let at = now - Duration::days(days_back) - Duration::minutes(((n * 37) % 600) as i64);

        let line_count = 1 + n % 4;
        let items: Vec<NewInvoiceItem> = (0..line_count)
            .map(|k| {
                let product = &products[(n * 7 + k * 11) % products.len()];
                let quantity = 1 + ((n + k) % 3) as i64;
                NewInvoiceItem {
                    product_id: product.id,
                    quantity,
                    rate: product.rate,
                    total: product.rate * quantity as f64,
                }
            })
            .collect();

        let request = NewInvoice {
            customer_id: Some(customer_ids[(n * 3) % customer_ids.len()]),
            total: items.iter().map(|item| item.total).sum(),
            items,
        };

        let draft = validate_new_invoice(request)?;
        if let Err(e) = db.invoices().create_invoice(&draft, &at).await {
            eprintln!("Failed to create invoice {}: {}", n, e);
            continue;
        }

        created += 1;
        if created % 50 == 0 {
            println!("  Created {} invoices...", created);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Created {} invoices in {:?}", created, elapsed);

    // Sanity check against the dashboard numbers
    let report = db.analytics().report(&Local::now()).await?;
    println!();
    println!("Dashboard preview:");
    println!("  This month:  {:.2}", report.current_month_revenue);
    println!("  Last month:  {:.2}", report.last_month_revenue);
    println!("  This year:   {:.2}", report.current_year_revenue);
    println!("  Last year:   {:.2}", report.last_year_revenue);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
