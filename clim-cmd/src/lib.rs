//! Command implementations for the climate API CLI.
//!
//! Provides subcommands for serving the HTTP API, building the SQLite
//! file from the dataset's CSV exports, and printing the station activity
//! report without going through HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Subcommand;
use clim_utils::dates::DEFAULT_WINDOW_DAYS;

pub mod load;
pub mod report;
pub mod serve;

/// Default location of the dataset.
pub const DEFAULT_DATABASE: &str = "Resources/hawaii.sqlite";

/// Default bind address of the HTTP server.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

#[derive(Subcommand)]
pub enum Command {
    /// Serve the read-only JSON API
    Serve {
        /// Path to the SQLite dataset (opened read-only)
        #[arg(short = 'd', long, env = "CLIMATE_DB", default_value = DEFAULT_DATABASE)]
        database: PathBuf,

        /// Address to listen on
        #[arg(short = 'b', long, env = "CLIMATE_BIND", default_value = DEFAULT_BIND)]
        bind: SocketAddr,

        /// Length of the trailing window of the tobs route, in days
        #[arg(long, env = "CLIMATE_WINDOW_DAYS", default_value_t = DEFAULT_WINDOW_DAYS)]
        window_days: u32,
    },

    /// Build a SQLite dataset from the measurement and station CSV exports
    Load {
        /// Measurement CSV (station,date,prcp,tobs)
        #[arg(short = 'm', long)]
        measurements: PathBuf,

        /// Station CSV (station,name,latitude,longitude,elevation)
        #[arg(short = 's', long)]
        stations: PathBuf,

        /// Output SQLite file (created if missing)
        #[arg(short = 'd', long, env = "CLIMATE_DB", default_value = DEFAULT_DATABASE)]
        database: PathBuf,
    },

    /// Print the most active station and its trailing-window observations as JSON
    MostActive {
        /// Path to the SQLite dataset (opened read-only)
        #[arg(short = 'd', long, env = "CLIMATE_DB", default_value = DEFAULT_DATABASE)]
        database: PathBuf,

        /// Length of the trailing window, in days
        #[arg(long, env = "CLIMATE_WINDOW_DAYS", default_value_t = DEFAULT_WINDOW_DAYS)]
        window_days: u32,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve {
            database,
            bind,
            window_days,
        } => serve::run_serve(&database, bind, window_days).await,
        Command::Load {
            measurements,
            stations,
            database,
        } => load::run_load(&measurements, &stations, &database),
        Command::MostActive {
            database,
            window_days,
        } => {
            let report = report::most_active_report(&database, window_days)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}
