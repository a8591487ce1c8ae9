//! # pos-server
//!
//! REST server for the web client.
//!
//! ```bash
//! POS_PORT=5000 POS_DB_PATH=./ledger.db cargo run -p pos --bin pos-server
//! ```

use tokio::signal;
use tracing::info;

use pos::state::ConfigState;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install SIGINT handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Logging and configuration
    pos::init_tracing();
    let config = ConfigState::from_env();
    let db_path = config.resolve_database_path()?;
    let addr = config.bind_addr();

    // 2. Database and shared state
    let state = pos::open_state(config, db_path).await?;
    let db = state.db().clone();

    // 3. Serve until signalled
    let app = pos::create_app(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Ledger POS server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("server shut down gracefully");
    Ok(())
}
