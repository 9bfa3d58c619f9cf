//! `serve` subcommand.

use std::net::SocketAddr;
use std::path::Path;

use clim_api::{router, AppState};
use clim_db::Database;
use log::info;

/// Open the dataset read-only and serve the API until Ctrl-C.
pub async fn run_serve(database: &Path, bind: SocketAddr, window_days: u32) -> anyhow::Result<()> {
    let db = Database::open(database)?;
    if let Some((first, last)) = db.query_date_range()? {
        info!("Serving measurements from {} to {}", first, last);
    } else {
        info!("Serving an empty measurement table");
    }
    let state = AppState::new(db).with_window_days(window_days);
    clim_api::serve(router(state), bind).await
}
