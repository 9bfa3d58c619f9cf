//! `load` subcommand: build the SQLite dataset from its CSV exports.

use std::path::Path;

use anyhow::Context;
use clim_db::Database;
use log::info;

/// Load the station and measurement CSV files into `database`.
///
/// The file is created when missing. Any rows it already holds are replaced.
pub fn run_load(measurements: &Path, stations: &Path, database: &Path) -> anyhow::Result<()> {
    let stations_csv = std::fs::read_to_string(stations)
        .with_context(|| format!("failed to read {}", stations.display()))?;
    let measurements_csv = std::fs::read_to_string(measurements)
        .with_context(|| format!("failed to read {}", measurements.display()))?;

    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let db = Database::create(database)?;
    let (station_count, measurement_count) =
        db.replace_dataset(&stations_csv, &measurements_csv)?;

    info!(
        "Load complete. {} stations and {} measurements written to {}",
        station_count,
        measurement_count,
        database.display()
    );
    Ok(())
}
