//! Typed query methods for retrieving climate data from the database.
//!
//! All queries return typed structs from [`crate::models`] (or
//! [`clim_obs::Observation`]) in the order the HTTP layer emits them.
//!
//! # Date Comparisons
//!
//! Dates are stored as `yyyy-MM-dd` text, so range filters compare the
//! bound `NaiveDate` parameters as text. Both bounds are inclusive.

use crate::models::{PrecipitationRecord, StationInfo, TemperatureSummary};
use crate::Database;
use chrono::NaiveDate;
use clim_obs::Observation;
use rusqlite::{params, OptionalExtension};

impl Database {
    // ───────────────────── Measurement Queries ─────────────────────

    /// Full scan of the measurement table as Observations.
    ///
    /// Rows come back in load order (row id). Rows lacking a station, date
    /// or temperature cannot form an Observation and are left out.
    pub fn list_observations(&self) -> anyhow::Result<Vec<Observation>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT station, date, tobs, prcp FROM measurement
             WHERE station IS NOT NULL AND date IS NOT NULL AND tobs IS NOT NULL
             ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Observation {
                    station_id: row.get(0)?,
                    date: row.get(1)?,
                    temperature: row.get(2)?,
                    precipitation: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: list_observations returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get every (station, date, prcp) triple, in load order.
    pub fn query_precipitation(&self) -> anyhow::Result<Vec<PrecipitationRecord>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT station, date, prcp FROM measurement
             ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PrecipitationRecord {
                    station: row.get(0)?,
                    date: row.get(1)?,
                    prcp: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_precipitation returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Min, max and average `tobs` for `start <= date`, and `date <= end`
    /// when an end is given.
    pub fn query_temperature_summary(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> anyhow::Result<TemperatureSummary> {
        let conn = self.connection()?;
        let summary = conn.query_row(
            "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement
             WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
            params![start, end],
            |row| {
                Ok(TemperatureSummary {
                    min: row.get(0)?,
                    max: row.get(1)?,
                    avg: row.get(2)?,
                })
            },
        )?;
        log::info!(
            "query: query_temperature_summary({}, {:?}) returned {:?}",
            start,
            end,
            summary
        );
        Ok(summary)
    }

    /// Get the (min, max) date over all measurements.
    ///
    /// `None` when the table is empty.
    pub fn query_date_range(&self) -> anyhow::Result<Option<(NaiveDate, NaiveDate)>> {
        let conn = self.connection()?;
        let (min_date, max_date) =
            conn.query_row("SELECT MIN(date), MAX(date) FROM measurement", [], |row| {
                Ok((
                    row.get::<_, Option<NaiveDate>>(0)?,
                    row.get::<_, Option<NaiveDate>>(1)?,
                ))
            })?;
        log::info!(
            "query: query_date_range returned ({:?}, {:?})",
            min_date,
            max_date
        );
        Ok(min_date.zip(max_date))
    }

    // ───────────────────── Station Queries ─────────────────────

    /// Get list of all stations, ordered by row id.
    pub fn query_stations(&self) -> anyhow::Result<Vec<StationInfo>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, station, name FROM station
             ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StationInfo {
                    id: row.get(0)?,
                    station: row.get(1)?,
                    name: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_stations returned {} records", rows.len());
        Ok(rows)
    }

    /// Look up one station by its code.
    ///
    /// If the code appears more than once, the lowest row id wins.
    pub fn query_station(&self, station: &str) -> anyhow::Result<Option<StationInfo>> {
        let conn = self.connection()?;
        let info = conn
            .query_row(
                "SELECT id, station, name FROM station
                 WHERE station = ?1
                 ORDER BY id
                 LIMIT 1",
                params![station],
                |row| {
                    Ok(StationInfo {
                        id: row.get(0)?,
                        station: row.get(1)?,
                        name: row.get(2)?,
                    })
                },
            )
            .optional()?;
        log::info!(
            "query: query_station({}) found: {}",
            station,
            info.is_some()
        );
        Ok(info)
    }
}
