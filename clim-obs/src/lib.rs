pub mod activity;
pub mod error;
pub mod observation;
pub mod station;

pub use activity::{
    most_active_station, recent_window_for, station_activity, trailing_window, DateWindow,
    StationActivityCount,
};
pub use error::{ResolverError, Result};
pub use observation::Observation;
pub use station::Station;
