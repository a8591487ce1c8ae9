//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`POS_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock is needed.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

/// File name of the database inside the platform data directory.
const DATABASE_FILE: &str = "ledger.db";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Explicit database file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// HTTP bind host.
    pub host: String,

    /// HTTP bind port.
    pub port: u16,

    /// Store name (printed on receipts)
    pub store_name: String,

    /// Store address lines (for receipts)
    pub store_address: Vec<String>,

    /// Store phone (for receipts)
    pub store_phone: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Thermal roll width in millimetres.
    pub receipt_width_mm: u32,

    /// Allowed CORS origin. `None` allows any origin.
    pub cors_origin: Option<String>,
}

impl Default for ConfigState {
    /// Development defaults: port 5000, rupee amounts, 58mm roll.
    fn default() -> Self {
        ConfigState {
            database_path: None,
            host: "0.0.0.0".to_string(),
            port: 5000,
            store_name: "Your Shop Name".to_string(),
            store_address: vec!["123, Shop Street, City - 123456".to_string()],
            store_phone: "+91 1234567890".to_string(),
            currency_symbol: "₹".to_string(),
            receipt_width_mm: 58,
            cors_origin: None,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `POS_DB_PATH`: Database file
    /// - `POS_HOST`, `POS_PORT`: HTTP bind address
    /// - `POS_STORE_NAME`, `POS_STORE_PHONE`: Receipt header
    /// - `POS_STORE_ADDRESS`: Receipt address lines, separated by `|`
    /// - `POS_CURRENCY_SYMBOL`: Currency symbol
    /// - `POS_RECEIPT_WIDTH_MM`: Roll width
    /// - `POS_CORS_ORIGIN`: Single allowed origin
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] over an arbitrary lookup.
    ///
    /// Unparsable numbers keep their defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = var("POS_DB_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(host) = var("POS_HOST") {
            config.host = host;
        }

        if let Some(port) = var("POS_PORT").and_then(|p| p.trim().parse().ok()) {
            config.port = port;
        }

        if let Some(name) = var("POS_STORE_NAME") {
            config.store_name = name;
        }

        if let Some(address) = var("POS_STORE_ADDRESS") {
            config.store_address = address
                .split('|')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(phone) = var("POS_STORE_PHONE") {
            config.store_phone = phone;
        }

        if let Some(symbol) = var("POS_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(width) = var("POS_RECEIPT_WIDTH_MM").and_then(|w| w.trim().parse().ok()) {
            config.receipt_width_mm = width;
        }

        config.cors_origin = var("POS_CORS_ORIGIN");

        config
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolves the database file, creating the data directory if needed.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.ledger.pos/ledger.db`
    /// - **Windows**: `%APPDATA%\ledger\pos\data\ledger.db`
    /// - **Linux**: `~/.local/share/pos/ledger.db`
    pub fn resolve_database_path(&self) -> io::Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "ledger", "pos").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine app data directory")
        })?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE))
    }

    /// Formats an amount with the currency symbol and two decimals.
    ///
    /// ```rust
    /// use pos::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234.5), "₹1234.50");
    /// ```
    pub fn format_currency(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        format!("{}{}{:.2}", sign, self.currency_symbol, amount.abs())
    }
}
