//! `most-active` subcommand: the station activity report on the command line.

use std::path::Path;

use clim_db::Database;
use clim_obs::{
    most_active_station, recent_window_for, trailing_window, DateWindow, Observation,
    StationActivityCount,
};
use serde::Serialize;

/// The most active station together with its trailing-window readings.
#[derive(Debug, Serialize)]
pub struct ActivityReport {
    pub station: StationActivityCount,
    /// Station name, when the station table knows the code.
    pub name: Option<String>,
    pub window: DateWindow,
    pub observations: Vec<Observation>,
}

/// Resolve the most active station in `database` and its last `window_days` days.
pub fn most_active_report(database: &Path, window_days: u32) -> anyhow::Result<ActivityReport> {
    let db = Database::open(database)?;
    build_report(&db, window_days)
}

fn build_report(db: &Database, window_days: u32) -> anyhow::Result<ActivityReport> {
    let observations = db.list_observations()?;
    let station = most_active_station(&observations)?;
    let window = trailing_window(&observations, window_days)?;
    let recent = recent_window_for(&observations, &station.station_id, window_days)?
        .into_iter()
        .cloned()
        .collect();
    let name = db.query_station(&station.station_id)?.map(|info| info.name);
    log::info!(
        "most active station {} with {} observations",
        station.station_id,
        station.count
    );
    Ok(ActivityReport {
        station,
        name,
        window,
        observations: recent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clim_obs::ResolverError;

    fn sample_db() -> Database {
        let db = Database::new().unwrap();
        db.load_stations(
            "station,name,latitude,longitude,elevation\nUSC00519281,\"WAIHEE 837.5, HI US\",21.45167,-157.84889,32.9\n",
        )
        .unwrap();
        db.load_measurements(
            "station,date,prcp,tobs\n\
             USC00519281,2024-01-01,0.1,70\n\
             USC00519281,2024-01-02,0.0,71\n\
             USC00513117,2024-01-03,0.2,72\n",
        )
        .unwrap();
        db
    }

    #[test]
    fn report_names_the_busiest_station() {
        let report = build_report(&sample_db(), 1).unwrap();
        assert_eq!(report.station.station_id, "USC00519281");
        assert_eq!(report.station.count, 2);
        assert_eq!(report.name.as_deref(), Some("WAIHEE 837.5, HI US"));
        assert_eq!(report.window.end.to_string(), "2024-01-03");
        assert_eq!(report.window.start.to_string(), "2024-01-02");
        assert_eq!(report.observations.len(), 1);
        assert_eq!(report.observations[0].date.to_string(), "2024-01-02");
    }

    #[test]
    fn report_serializes_to_json() {
        let report = build_report(&sample_db(), 365).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["station"]["station_id"], "USC00519281");
        assert_eq!(json["window"]["start"], "2023-01-03");
        assert_eq!(json["observations"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn report_on_empty_dataset_fails() {
        let db = Database::new().unwrap();
        let err = build_report(&db, 365).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ResolverError>(),
            Some(&ResolverError::EmptyInput)
        );
    }
}
