use chrono::naive::NaiveDate;
use clim_utils::dates::DATE_FORMAT;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

/// A single daily observation from a weather station.
///
/// Mirrors one row of the `measurement` table. Records are never mutated
/// once read; everything downstream derives new values from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Station code (e.g. "USC00519281")
    pub station_id: String,
    /// Calendar day of the observation
    pub date: NaiveDate,
    /// Observed temperature (tobs), degrees Fahrenheit
    pub temperature: f64,
    /// Precipitation in inches, absent on days the gauge did not report
    pub precipitation: Option<f64>,
}

impl Observation {
    pub fn new(
        station_id: impl Into<String>,
        date: NaiveDate,
        temperature: f64,
        precipitation: Option<f64>,
    ) -> Self {
        Observation {
            station_id: station_id.into(),
            date,
            temperature,
            precipitation,
        }
    }

    /// Parse a measurement CSV export into Observations.
    ///
    /// Expected columns (with headers): `station,date,prcp,tobs`.
    /// Rows with an empty station, an unparseable date, or a non-numeric
    /// temperature are skipped. An empty or non-numeric `prcp` becomes `None`.
    pub fn parse_measurement_csv(csv_data: &str) -> Result<Vec<Observation>, csv::Error> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut observations = Vec::new();
        let mut skipped = 0u32;
        for result in rdr.records() {
            let record = result?;
            match Observation::try_from(&record) {
                Ok(obs) => observations.push(obs),
                Err(()) => skipped += 1,
            }
        }
        log::debug!(
            "observation: parsed {} measurements, skipped {} invalid",
            observations.len(),
            skipped
        );
        Ok(observations)
    }
}

impl TryFrom<&StringRecord> for Observation {
    type Error = ();

    fn try_from(value: &StringRecord) -> Result<Self, Self::Error> {
        let station_id = value.get(0).map(str::trim).unwrap_or("");
        if station_id.is_empty() {
            return Err(());
        }
        let date = value
            .get(1)
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
            .ok_or(())?;
        let precipitation = value.get(2).and_then(|s| s.trim().parse::<f64>().ok());
        let temperature = value
            .get(3)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .ok_or(())?;
        Ok(Observation::new(station_id, date, temperature, precipitation))
    }
}
