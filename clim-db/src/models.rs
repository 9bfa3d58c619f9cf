//! Query result model structs for the measurement and station tables.
//!
//! All structs derive `Serialize` so the HTTP layer can hand them to
//! `serde_json` directly.

use chrono::NaiveDate;
use serde::Serialize;

/// Station row as listed by the stations route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationInfo {
    /// Row id of the station table.
    pub id: i64,
    /// Station code (e.g. "USC00519281").
    pub station: String,
    /// Human-readable station name.
    pub name: String,
}

/// A (station, date, prcp) triple from the measurement table.
///
/// Columns are nullable in the table, so a NULL station or date is carried
/// through as `None` instead of failing the whole listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PrecipitationRecord {
    pub station: Option<String>,
    pub date: Option<NaiveDate>,
    /// Inches; `None` where the gauge did not report.
    pub prcp: Option<f64>,
}

/// Min/max/average observed temperature over a date range.
///
/// Every field is `None` when no measurement falls in the range.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct TemperatureSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}
