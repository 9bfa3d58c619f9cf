//! CSV data loading functions for populating the SQLite database.
//!
//! Each loader method parses CSV data from a string slice and inserts rows
//! into the corresponding table inside a single transaction. The formats
//! match the two CSV exports the dataset ships as.
//!
//! # CSV Formats
//!
//! - **Stations** (has headers): `station,name,latitude,longitude,elevation`
//! - **Measurements** (has headers): `station,date(yyyy-MM-dd),prcp,tobs`

use crate::Database;
use clim_obs::{Observation, Station};
use rusqlite::{params, Transaction};

fn insert_stations(tx: &Transaction<'_>, stations: &[Station]) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO station (station, name, latitude, longitude, elevation)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for s in stations {
        stmt.execute(params![s.station, s.name, s.latitude, s.longitude, s.elevation])?;
    }
    Ok(())
}

fn insert_measurements(tx: &Transaction<'_>, observations: &[Observation]) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO measurement (station, date, prcp, tobs)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for obs in observations {
        stmt.execute(params![
            obs.station_id,
            obs.date,
            obs.precipitation,
            obs.temperature
        ])?;
    }
    Ok(())
}

impl Database {
    /// Load station metadata from CSV string.
    ///
    /// Row ids are assigned in file order, starting after the highest
    /// existing id. Returns the number of stations inserted.
    ///
    /// # Example CSV
    /// ```text
    /// station,name,latitude,longitude,elevation
    /// USC00519397,"WAIKIKI 717.2, HI US",21.2716,-157.8168,3.0
    /// ```
    pub fn load_stations(&self, csv_data: &str) -> anyhow::Result<usize> {
        let stations = Station::parse_station_csv(csv_data)?;
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        insert_stations(&tx, &stations)?;
        tx.commit()?;
        log::info!("loader: Loaded {} stations", stations.len());
        Ok(stations.len())
    }

    /// Load daily measurements from CSV string.
    ///
    /// Rows without a station, with a malformed date, or with a non-numeric
    /// `tobs` are skipped. An empty `prcp` is stored as NULL. Returns the
    /// number of measurements inserted.
    ///
    /// # Example CSV
    /// ```text
    /// station,date,prcp,tobs
    /// USC00519397,2010-01-01,0.08,65
    /// USC00519397,2010-01-02,,63
    /// ```
    pub fn load_measurements(&self, csv_data: &str) -> anyhow::Result<usize> {
        let observations = Observation::parse_measurement_csv(csv_data)?;
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        insert_measurements(&tx, &observations)?;
        tx.commit()?;
        log::info!("loader: Loaded {} measurements", observations.len());
        Ok(observations.len())
    }

    /// Replace the whole dataset with the contents of the two CSV exports.
    ///
    /// Both tables are emptied and refilled in one transaction, so loading
    /// the same files twice leaves one copy of every row and ids start at 1
    /// again. Returns the number of stations and measurements inserted.
    pub fn replace_dataset(
        &self,
        stations_csv: &str,
        measurements_csv: &str,
    ) -> anyhow::Result<(usize, usize)> {
        let stations = Station::parse_station_csv(stations_csv)?;
        let observations = Observation::parse_measurement_csv(measurements_csv)?;
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        let cleared = tx.execute("DELETE FROM measurement", [])?;
        tx.execute("DELETE FROM station", [])?;
        if cleared > 0 {
            log::warn!("loader: replacing {} existing measurements", cleared);
        }
        insert_stations(&tx, &stations)?;
        insert_measurements(&tx, &observations)?;
        tx.commit()?;
        log::info!(
            "loader: Loaded {} stations and {} measurements",
            stations.len(),
            observations.len()
        );
        Ok((stations.len(), observations.len()))
    }
}
