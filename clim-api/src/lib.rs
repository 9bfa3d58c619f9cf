//! Read-only JSON HTTP API over the climate dataset.
//!
//! # Routes
//!
//! | Route | Body |
//! |---|---|
//! | `/` | HTML list of the routes below |
//! | `/api/v1.0/stations` | `[id, station, ...]` |
//! | `/api/v1.0/precipitation` | `[station, date, prcp, ...]` |
//! | `/api/v1.0/tobs` | `[id, station, date, tobs, ...]` for the most active station over the last year |
//! | `/api/v1.0/<start>` | `[min, max, avg]` tobs for `date >= start` |
//! | `/api/v1.0/<start>/<end>` | `[min, max, avg]` tobs for `start <= date <= end` |
//!
//! Dates are `yyyy-MM-dd`. Errors come back as
//! `{"error": {"code": ..., "message": ...}}`.

pub mod error;
pub mod flatten;
pub mod routes;
pub mod server;

use axum::routing::get;
use axum::Router;
use clim_db::Database;
use clim_utils::dates::DEFAULT_WINDOW_DAYS;

pub use error::ApiError;
pub use server::serve;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Length of the trailing window of the `tobs` route.
    pub window_days: u32,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn with_window_days(mut self, window_days: u32) -> Self {
        self.window_days = window_days;
        self
    }
}

/// Build the router with every route mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route(routes::STATIONS_PATH, get(routes::stations))
        .route(routes::PRECIPITATION_PATH, get(routes::precipitation))
        .route(routes::TOBS_PATH, get(routes::tobs))
        .route(routes::START_PATH, get(routes::temperature_from))
        .route(routes::START_END_PATH, get(routes::temperature_between))
        .fallback(routes::not_found)
        .with_state(state)
}
