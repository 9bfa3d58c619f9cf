use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// A weather station of the climate dataset.
///
/// Mirrors one row of the `station` table, minus the surrogate row id
/// which the store assigns on insert.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Station code (e.g. "USC00519281")
    pub station: String,
    /// Human-readable name of the station
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
    /// Elevation in meters
    pub elevation: Option<f64>,
}

impl Station {
    /// Parse a CSV string of station data into a vector of Stations.
    ///
    /// Expected CSV columns (with headers): station, name, latitude, longitude, elevation.
    /// Rows without a station code are skipped; unparseable coordinates become `None`.
    pub fn parse_station_csv(csv_object: &str) -> Result<Vec<Station>, csv::Error> {
        let mut station_list: Vec<Station> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let station = record.get(0).unwrap_or("").trim();
            if station.is_empty() {
                continue;
            }
            let name = record.get(1).unwrap_or("").trim();
            let number = |idx: usize| record.get(idx).and_then(|s| s.trim().parse::<f64>().ok());
            station_list.push(Station {
                station: station.to_string(),
                name: name.to_string(),
                latitude: number(2),
                longitude: number(3),
                elevation: number(4),
            });
        }
        Ok(station_list)
    }
}
