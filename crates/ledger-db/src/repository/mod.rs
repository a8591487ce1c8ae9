//! # Repository Module
//!
//! Database repository implementations for Ledger POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Command (HTTP route or IPC channel)                                   │
//! │       │                                                                 │
//! │       │  db.invoices().create_invoice(&draft, &now)                    │
//! │       ▼                                                                 │
//! │  InvoiceRepository                                                     │
//! │  ├── create_invoice(&self, draft, now)                                 │
//! │  ├── list_with_details(&self)                                          │
//! │  └── get_with_details(&self, id)                                       │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer CRUD
//! - [`InvoiceRepository`](invoice::InvoiceRepository) - Invoice transaction and listing
//! - [`AnalyticsRepository`](analytics::AnalyticsRepository) - Dashboard report

pub mod analytics;
pub mod customer;
pub mod invoice;
pub mod product;

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;
    use ledger_core::{Customer, CustomerInput, Product, ProductInput};

    use crate::{Database, DbConfig};

    pub async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// A database file under the system temp dir, removed (with its WAL
    /// and shared-memory files) on drop.
    pub struct TempDbFile {
        pub path: PathBuf,
    }

    impl TempDbFile {
        pub fn new(label: &str) -> Self {
            static NEXT: AtomicUsize = AtomicUsize::new(0);
            let n = NEXT.fetch_add(1, Ordering::Relaxed);
            let path = std::env::temp_dir().join(format!(
                "ledger-{}-{}-{}.db",
                label,
                std::process::id(),
                n
            ));
            let file = TempDbFile { path };
            file.remove();
            file
        }

        pub async fn open(&self) -> Database {
            Database::new(DbConfig::new(&self.path)).await.unwrap()
        }

        fn remove(&self) {
            for suffix in ["", "-wal", "-shm"] {
                let mut name = self.path.clone().into_os_string();
                name.push(suffix);
                let _ = std::fs::remove_file(PathBuf::from(name));
            }
        }
    }

    impl Drop for TempDbFile {
        fn drop(&mut self) {
            self.remove();
        }
    }

    pub async fn product(db: &Database, name: &str, rate: f64) -> Product {
        let input = ProductInput {
            name: name.to_string(),
            rate,
        };
        db.products().create(&input, Utc::now()).await.unwrap()
    }

    pub async fn customer(db: &Database, name: &str, mobile: &str) -> Customer {
        let input = CustomerInput {
            name: name.to_string(),
            mobile: mobile.to_string(),
            address: "12 Market Road".to_string(),
        };
        db.customers().create(&input, Utc::now()).await.unwrap()
    }
}
