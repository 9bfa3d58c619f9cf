//! Shared utility functions for the climate observation crates.

/// Date utility functions
pub mod dates {
    use chrono::{Days, NaiveDate};

    /// Date format used by the dataset and the HTTP routes: "yyyy-MM-dd"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Length of the trailing window used by the `tobs` report.
    pub const DEFAULT_WINDOW_DAYS: u32 = 365;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
    }

    /// First day of a window of `window_days` days ending at `end`.
    ///
    /// `end - window_days`, saturating at the earliest representable date.
    pub fn window_start(end: NaiveDate, window_days: u32) -> NaiveDate {
        end.checked_sub_days(Days::new(u64::from(window_days)))
            .unwrap_or(NaiveDate::MIN)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2017-08-23");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_rejects_malformed() {
            assert!(parse_date("2017-13-01").is_err());
            assert!(parse_date("20170823").is_err());
            assert!(parse_date("yesterday").is_err());
            assert!(parse_date("").is_err());
        }

        #[test]
        fn test_window_start_one_year() {
            let end = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
            assert_eq!(
                window_start(end, DEFAULT_WINDOW_DAYS),
                NaiveDate::from_ymd_opt(2016, 8, 23).unwrap()
            );
        }

        #[test]
        fn test_window_start_crosses_leap_day() {
            let end = NaiveDate::from_ymd_opt(2016, 3, 1).unwrap();
            assert_eq!(
                window_start(end, 365),
                NaiveDate::from_ymd_opt(2015, 3, 2).unwrap()
            );
        }

        #[test]
        fn test_window_start_zero_days() {
            let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
            assert_eq!(window_start(end, 0), end);
        }

        #[test]
        fn test_window_start_saturates() {
            assert_eq!(window_start(NaiveDate::MIN, 1), NaiveDate::MIN);
        }
    }
}
