//! # pos: Ledger POS Application
//!
//! One set of command functions, served two ways:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pos-server  ──► axum Router (routes::*) ──┐                            │
//! │                                            ├──► commands::* ──► ledger-db│
//! │  pos-desktop ──► ipc::serve(stdin/stdout) ─┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`commands`] - Transport-agnostic operations
//! - [`routes`] - HTTP handlers
//! - [`ipc`] - Line-delimited JSON host for the desktop shell
//! - [`receipt`] - Thermal receipt HTML
//! - [`state`] - Configuration and shared state
//! - [`error`] - Unified API error

pub mod commands;
pub mod error;
pub mod ipc;
pub mod receipt;
pub mod routes;
pub mod state;

use axum::http::HeaderValue;
use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use ledger_db::{Database, DbConfig, DbResult};
use state::{AppState, ConfigState};

const DEFAULT_LOG_FILTER: &str = "info,ledger=debug,pos=debug,sqlx=warn";

/// Installs the tracing subscriber.
///
/// Logs go to stderr: stdout belongs to the IPC protocol.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Opens (and migrates) the database at `path` and builds the shared state.
pub async fn open_state(
    config: ConfigState,
    path: impl Into<std::path::PathBuf>,
) -> DbResult<AppState> {
    let db_config = DbConfig::new(path);
    info!(path = %db_config.database_path.display(), "Opening database");

    let db = Database::new(db_config).await?;
    Ok(AppState::new(db, config))
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(state.config().cors_origin.as_deref());

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/api/products",
            get(routes::products::list).post(routes::products::create),
        )
        .route(
            "/api/products/{id}",
            put(routes::products::update).delete(routes::products::delete),
        )
        .route(
            "/api/customers",
            get(routes::customers::list).post(routes::customers::create),
        )
        .route(
            "/api/customers/{id}",
            put(routes::customers::update).delete(routes::customers::delete),
        )
        .route(
            "/api/invoices",
            get(routes::invoices::list).post(routes::invoices::create),
        )
        .route("/api/invoices/analytics", get(routes::analytics::get))
        .route("/api/invoices/{id}/receipt", get(routes::invoices::receipt))
        .route("/api/analytics", get(routes::analytics::get))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(_)) => {
            warn!(origin = ?origin, "Invalid CORS origin, allowing any");
            AllowOrigin::any()
        }
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
