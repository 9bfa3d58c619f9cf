//! SQL schema definitions for the climate dataset.
//!
//! Contains the CREATE TABLE statements for `measurement` and `station`,
//! matching the layout of the published SQLite file, and the column check
//! applied when an existing file is opened.

use anyhow::bail;
use rusqlite::Connection;

/// Columns every `measurement` table must provide.
pub const MEASUREMENT_COLUMNS: [&str; 5] = ["id", "station", "date", "prcp", "tobs"];

/// Columns every `station` table must provide.
pub const STATION_COLUMNS: [&str; 6] = ["id", "station", "name", "latitude", "longitude", "elevation"];

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `measurement` - One row per station and day: precipitation (nullable) and observed temperature
/// - `station` - Station code, name and location
///
/// `id` is the row id of both tables; the measurement row id preserves the
/// order in which records were loaded.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS measurement (
        id INTEGER PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    );
    CREATE INDEX IF NOT EXISTS idx_measurement_station ON measurement(station);
    CREATE INDEX IF NOT EXISTS idx_measurement_date ON measurement(date);

    CREATE TABLE IF NOT EXISTS station (
        id INTEGER PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
    "#
}

/// Check that both tables exist and carry the expected columns.
///
/// Extra columns are tolerated; a missing table or column is an error.
pub fn verify_schema(conn: &Connection) -> anyhow::Result<()> {
    verify_table(conn, "measurement", &MEASUREMENT_COLUMNS)?;
    verify_table(conn, "station", &STATION_COLUMNS)?;
    Ok(())
}

fn verify_table(conn: &Connection, table: &str, expected: &[&str]) -> anyhow::Result<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    if columns.is_empty() {
        bail!("table '{}' not found", table);
    }
    let missing: Vec<&str> = expected
        .iter()
        .copied()
        .filter(|col| !columns.iter().any(|c| c.eq_ignore_ascii_case(col)))
        .collect();
    if !missing.is_empty() {
        bail!("table '{}' is missing columns: {}", table, missing.join(", "));
    }
    log::debug!("schema: table '{}' has columns {:?}", table, columns);
    Ok(())
}
