//! # Application State
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppState (cheap to clone, shared by every route / IPC request)         │
//! │                                                                         │
//! │  ┌──────────────────────────┐    ┌──────────────────────────────────┐   │
//! │  │  db: Database            │    │  config: Arc<ConfigState>        │   │
//! │  │  • SqlitePool            │    │  • bind address                  │   │
//! │  │  • invoice write gate    │    │  • store details for receipts    │   │
//! │  └──────────────────────────┘    └──────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::ConfigState;

use ledger_db::Database;
use std::sync::Arc;

/// State handed to every command.
#[derive(Debug, Clone)]
pub struct AppState {
    db: Database,
    config: Arc<ConfigState>,
}

impl AppState {
    pub fn new(db: Database, config: ConfigState) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }
}
