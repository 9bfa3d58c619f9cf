//! Station activity resolution.
//!
//! Answers "which station reported the most observations" and "what did a
//! station record over the trailing window ending at the dataset's latest
//! date". Everything here is a pure function of the input slice: nothing is
//! cached and the input records are only ever borrowed.

use std::collections::HashMap;

use chrono::NaiveDate;
use clim_utils::dates::window_start;
use serde::Serialize;

use crate::error::{ResolverError, Result};
use crate::observation::Observation;

/// Number of observations attributed to one station.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StationActivityCount {
    pub station_id: String,
    pub count: usize,
}

/// Inclusive date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Count observations per station.
///
/// One entry per distinct station, in the order each station is first
/// encountered in `observations`.
pub fn station_activity(observations: &[Observation]) -> Vec<StationActivityCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<StationActivityCount> = Vec::new();
    for obs in observations {
        match index.get(obs.station_id.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(obs.station_id.as_str(), counts.len());
                counts.push(StationActivityCount {
                    station_id: obs.station_id.clone(),
                    count: 1,
                });
            }
        }
    }
    counts
}

/// The station with the greatest number of observations.
///
/// When several stations share the maximum, the one that appears first in
/// `observations` wins.
pub fn most_active_station(observations: &[Observation]) -> Result<StationActivityCount> {
    station_activity(observations)
        .into_iter()
        .fold(None, |best: Option<StationActivityCount>, candidate| match best {
            Some(best) if best.count >= candidate.count => Some(best),
            _ => Some(candidate),
        })
        .ok_or(ResolverError::EmptyInput)
}

/// The `window_days` window ending at the latest date in `observations`.
pub fn trailing_window(observations: &[Observation], window_days: u32) -> Result<DateWindow> {
    let end = observations
        .iter()
        .map(|obs| obs.date)
        .max()
        .ok_or(ResolverError::NoObservations)?;
    Ok(DateWindow {
        start: window_start(end, window_days),
        end,
    })
}

/// Observations of `station_id` inside the trailing window, oldest first.
///
/// The window is anchored on the latest date of the whole dataset, not on
/// the station's own latest observation. A station with nothing in the
/// window yields an empty vector.
pub fn recent_window_for<'a>(
    observations: &'a [Observation],
    station_id: &str,
    window_days: u32,
) -> Result<Vec<&'a Observation>> {
    let window = trailing_window(observations, window_days)?;
    let mut matching: Vec<&Observation> = observations
        .iter()
        .filter(|obs| obs.station_id == station_id && window.contains(obs.date))
        .collect();
    matching.sort_by_key(|obs| obs.date);
    Ok(matching)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(station: &str, y: i32, m: u32, d: u32) -> Observation {
        Observation::new(station, date(y, m, d), 70.0, None)
    }

    /// `[(A,2024-01-01),(A,2024-01-02),(B,2024-01-03)]`
    fn sample() -> Vec<Observation> {
        vec![
            obs("A", 2024, 1, 1),
            obs("A", 2024, 1, 2),
            obs("B", 2024, 1, 3),
        ]
    }

    // ───────────────────── station_activity ─────────────────────

    #[test]
    fn station_activity_counts_in_first_encounter_order() {
        let data = vec![
            obs("B", 2024, 1, 1),
            obs("A", 2024, 1, 2),
            obs("B", 2024, 1, 3),
            obs("C", 2024, 1, 4),
            obs("A", 2024, 1, 5),
            obs("B", 2024, 1, 6),
        ];
        let counts = station_activity(&data);
        let pairs: Vec<(&str, usize)> = counts
            .iter()
            .map(|c| (c.station_id.as_str(), c.count))
            .collect();
        assert_eq!(pairs, vec![("B", 3), ("A", 2), ("C", 1)]);
    }

    #[test]
    fn station_activity_empty() {
        assert!(station_activity(&[]).is_empty());
    }

    // ───────────────────── most_active_station ─────────────────────

    #[test]
    fn most_active_station_example() {
        let winner = most_active_station(&sample()).unwrap();
        assert_eq!(
            winner,
            StationActivityCount {
                station_id: "A".to_string(),
                count: 2
            }
        );
    }

    #[test]
    fn most_active_station_empty_input() {
        assert_eq!(most_active_station(&[]), Err(ResolverError::EmptyInput));
    }

    #[test]
    fn most_active_station_count_dominates_all_others() {
        let data = vec![
            obs("C", 2024, 1, 1),
            obs("A", 2024, 1, 1),
            obs("B", 2024, 1, 1),
            obs("B", 2024, 1, 2),
            obs("C", 2024, 1, 2),
            obs("B", 2024, 1, 3),
        ];
        let winner = most_active_station(&data).unwrap();
        for other in station_activity(&data) {
            assert!(winner.count >= other.count);
        }
        assert_eq!(winner.station_id, "B");
        assert_eq!(winner.count, 3);
    }

    #[test]
    fn most_active_station_unique_max_is_order_independent() {
        let mut data = vec![
            obs("A", 2024, 1, 1),
            obs("B", 2024, 1, 1),
            obs("B", 2024, 1, 2),
            obs("C", 2024, 1, 1),
        ];
        let forward = most_active_station(&data).unwrap();
        data.reverse();
        let backward = most_active_station(&data).unwrap();
        data.rotate_left(1);
        let rotated = most_active_station(&data).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, rotated);
        assert_eq!(forward.station_id, "B");
    }

    #[test]
    fn most_active_station_tie_goes_to_first_encountered() {
        let data = vec![
            obs("B", 2024, 1, 1),
            obs("A", 2024, 1, 1),
            obs("A", 2024, 1, 2),
            obs("B", 2024, 1, 2),
        ];
        assert_eq!(most_active_station(&data).unwrap().station_id, "B");

        let mut reordered = data.clone();
        reordered.swap(0, 1);
        assert_eq!(most_active_station(&reordered).unwrap().station_id, "A");
    }

    // ───────────────────── trailing_window ─────────────────────

    #[test]
    fn trailing_window_anchors_on_latest_date() {
        let window = trailing_window(&sample(), 1).unwrap();
        assert_eq!(window.end, date(2024, 1, 3));
        assert_eq!(window.start, date(2024, 1, 2));
    }

    #[test]
    fn trailing_window_default_year() {
        let data = vec![obs("A", 2017, 8, 23), obs("A", 2010, 1, 1)];
        let window = trailing_window(&data, 365).unwrap();
        assert_eq!(window.start, date(2016, 8, 23));
        assert_eq!(window.end, date(2017, 8, 23));
    }

    #[test]
    fn trailing_window_no_observations() {
        assert_eq!(trailing_window(&[], 365), Err(ResolverError::NoObservations));
    }

    // ───────────────────── recent_window_for ─────────────────────

    #[test]
    fn recent_window_for_example() {
        let data = sample();
        let recent = recent_window_for(&data, "A", 1).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].station_id, "A");
        assert_eq!(recent[0].date, date(2024, 1, 2));
    }

    #[test]
    fn recent_window_for_no_observations() {
        assert_eq!(
            recent_window_for(&[], "A", 365),
            Err(ResolverError::NoObservations)
        );
    }

    #[test]
    fn recent_window_for_station_outside_window_is_empty() {
        let data = vec![
            obs("A", 2023, 1, 1),
            obs("B", 2024, 6, 1),
        ];
        let recent = recent_window_for(&data, "A", 30).unwrap();
        assert!(recent.is_empty());
    }

    #[test]
    fn recent_window_for_unknown_station_is_empty() {
        let data = sample();
        let recent = recent_window_for(&data, "Z", 365).unwrap();
        assert!(recent.is_empty());
    }

    #[test]
    fn recent_window_for_uses_global_latest_date() {
        // A's own latest date is 2024-01-10 but the dataset ends 2024-03-01,
        // so a 30 day window starting 2024-01-31 excludes everything of A.
        let data = vec![
            obs("A", 2024, 1, 5),
            obs("A", 2024, 1, 10),
            obs("B", 2024, 3, 1),
        ];
        assert!(recent_window_for(&data, "A", 30).unwrap().is_empty());
        assert_eq!(recent_window_for(&data, "A", 60).unwrap().len(), 2);
    }

    #[test]
    fn recent_window_for_stays_inside_bounds_and_sorts() {
        let data = vec![
            obs("A", 2024, 3, 1),
            obs("A", 2023, 12, 31),
            obs("A", 2024, 1, 15),
            obs("A", 2024, 2, 1),
            obs("B", 2024, 3, 10),
            obs("A", 2024, 2, 9),
        ];
        let window = trailing_window(&data, 30).unwrap();
        let recent = recent_window_for(&data, "A", 30).unwrap();
        for record in &recent {
            assert!(record.date >= window.start);
            assert!(record.date <= window.end);
        }
        let dates: Vec<NaiveDate> = recent.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date(2024, 2, 9), date(2024, 3, 1)]);
    }

    #[test]
    fn recent_window_for_includes_both_edges() {
        let data = vec![
            obs("A", 2024, 1, 1),
            obs("A", 2024, 1, 11),
        ];
        let recent = recent_window_for(&data, "A", 10).unwrap();
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn recent_window_for_does_not_mutate_input() {
        let data = sample();
        let before = data.clone();
        let _ = recent_window_for(&data, "A", 365).unwrap();
        let _ = most_active_station(&data).unwrap();
        assert_eq!(data, before);
    }
}
