//! Route handlers.
//!
//! Handlers run their queries on the blocking pool, then flatten the rows
//! into one JSON array. Nothing is cached between requests.

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use chrono::NaiveDate;
use clim_db::Database;
use clim_obs::{most_active_station, recent_window_for};
use clim_utils::dates::parse_date;
use serde_json::Value;

use crate::error::ApiError;
use crate::flatten::{flatten, StationTemperature};
use crate::AppState;

/// Route paths, in the order the index lists them.
pub const STATIONS_PATH: &str = "/api/v1.0/stations";
pub const PRECIPITATION_PATH: &str = "/api/v1.0/precipitation";
pub const TOBS_PATH: &str = "/api/v1.0/tobs";
pub const START_PATH: &str = "/api/v1.0/:start";
pub const START_END_PATH: &str = "/api/v1.0/:start/:end";

type JsonRows = Result<Json<Vec<Value>>, ApiError>;

/// Run `f` against the database on the blocking pool.
async fn with_db<T, F>(db: &Database, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let db = db.clone();
    tokio::task::spawn_blocking(move || f(&db)).await?
}

fn parse_path_date(input: &str) -> Result<NaiveDate, ApiError> {
    parse_date(input).map_err(|e| ApiError::DateParse {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// List all available api routes.
pub async fn index() -> Html<String> {
    let mut body = String::from("Available Routes:<br/>");
    for path in [STATIONS_PATH, PRECIPITATION_PATH, TOBS_PATH] {
        body.push_str(path);
        body.push_str("<br/>");
    }
    body.push_str("/api/v1.0/&#42startdate<br/>");
    body.push_str("/api/v1.0/&#42startdate/&#42enddate<br/>");
    body.push_str("&#42Where startdate and enddate follow the yyyy-MM-dd format.");
    Html(body)
}

/// `[id, station, ...]` for every station.
pub async fn stations(State(state): State<AppState>) -> JsonRows {
    let rows = with_db(&state.db, |db| Ok(db.query_stations()?)).await?;
    log::info!("GET {}: {} stations", STATIONS_PATH, rows.len());
    Ok(Json(flatten(rows)))
}

/// `[station, date, prcp, ...]` for every measurement.
pub async fn precipitation(State(state): State<AppState>) -> JsonRows {
    let rows = with_db(&state.db, |db| Ok(db.query_precipitation()?)).await?;
    log::info!("GET {}: {} measurements", PRECIPITATION_PATH, rows.len());
    Ok(Json(flatten(rows)))
}

/// `[id, station, date, tobs, ...]` for the most active station over the
/// trailing window ending at the dataset's latest date.
pub async fn tobs(State(state): State<AppState>) -> JsonRows {
    let window_days = state.window_days;
    let rows = with_db(&state.db, move |db| {
        let observations = db.list_observations()?;
        let busiest = most_active_station(&observations)?;
        let recent = recent_window_for(&observations, &busiest.station_id, window_days)?;
        let info = db
            .query_station(&busiest.station_id)?
            .ok_or_else(|| ApiError::UnknownStation(busiest.station_id.clone()))?;
        log::info!(
            "most active station {} ({} observations), {} in the last {} days",
            busiest.station_id,
            busiest.count,
            recent.len(),
            window_days
        );
        Ok(recent
            .into_iter()
            .map(|obs| StationTemperature {
                id: info.id,
                station: info.station.clone(),
                date: obs.date,
                tobs: obs.temperature,
            })
            .collect::<Vec<_>>())
    })
    .await?;
    log::info!("GET {}: {} readings", TOBS_PATH, rows.len());
    Ok(Json(flatten(rows)))
}

/// `[min, max, avg]` of tobs for `date >= start`.
pub async fn temperature_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> JsonRows {
    let start = parse_path_date(&start)?;
    let summary = with_db(&state.db, move |db| {
        Ok(db.query_temperature_summary(start, None)?)
    })
    .await?;
    log::info!("GET /api/v1.0/{}: {:?}", start, summary);
    Ok(Json(flatten([summary])))
}

/// `[min, max, avg]` of tobs for `start <= date <= end`.
pub async fn temperature_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> JsonRows {
    let start = parse_path_date(&start)?;
    let end = parse_path_date(&end)?;
    let summary = with_db(&state.db, move |db| {
        Ok(db.query_temperature_summary(start, Some(end))?)
    })
    .await?;
    log::info!("GET /api/v1.0/{}/{}: {:?}", start, end, summary);
    Ok(Json(flatten([summary])))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
