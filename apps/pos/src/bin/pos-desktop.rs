//! # pos-desktop
//!
//! IPC host for the desktop shell. The shell spawns this process and talks
//! to it over stdin/stdout, one JSON request per line. Logs go to stderr.

use tokio::io::{stdin, stdout, BufReader};
use tracing::info;

use pos::state::ConfigState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pos::init_tracing();

    let config = ConfigState::from_env();
    let db_path = config.resolve_database_path()?;
    info!("Starting Ledger POS desktop host v{}", env!("CARGO_PKG_VERSION"));

    let state = pos::open_state(config, db_path).await?;

    pos::ipc::serve(&state, BufReader::new(stdin()), stdout()).await?;

    state.db().close().await;
    info!("Desktop host stopped");
    Ok(())
}
