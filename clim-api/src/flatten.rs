//! Flattening of result rows into a single JSON array.
//!
//! Every list route answers with one flat array: the fields of the first
//! row, then the fields of the second, and so on.

use chrono::NaiveDate;
use clim_db::models::{PrecipitationRecord, StationInfo, TemperatureSummary};
use clim_utils::dates::format_date;
use serde_json::{json, Value};

/// A row that contributes a fixed sequence of values to a flat array.
pub trait FlatRow {
    fn into_values(self) -> Vec<Value>;
}

/// One temperature reading of the most active station, joined with its
/// station row.
#[derive(Debug, Clone, PartialEq)]
pub struct StationTemperature {
    pub id: i64,
    pub station: String,
    pub date: NaiveDate,
    pub tobs: f64,
}

/// Concatenate the values of every row.
pub fn flatten<R: FlatRow>(rows: impl IntoIterator<Item = R>) -> Vec<Value> {
    rows.into_iter().flat_map(FlatRow::into_values).collect()
}

impl FlatRow for StationInfo {
    fn into_values(self) -> Vec<Value> {
        vec![json!(self.id), json!(self.station)]
    }
}

impl FlatRow for PrecipitationRecord {
    fn into_values(self) -> Vec<Value> {
        vec![
            json!(self.station),
            json!(self.date.as_ref().map(format_date)),
            json!(self.prcp),
        ]
    }
}

impl FlatRow for StationTemperature {
    fn into_values(self) -> Vec<Value> {
        vec![
            json!(self.id),
            json!(self.station),
            json!(format_date(&self.date)),
            json!(self.tobs),
        ]
    }
}

impl FlatRow for TemperatureSummary {
    fn into_values(self) -> Vec<Value> {
        vec![json!(self.min), json!(self.max), json!(self.avg)]
    }
}
