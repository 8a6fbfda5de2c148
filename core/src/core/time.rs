//! Time handling for the simulation
//!
//! The simulation replays one calendar day of station events. This module
//! owns the fixed input timestamp format and the day-boundary arithmetic
//! used to truncate the event timeline.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Fixed textual format of trip timestamps: `YYYY-MM-DD HH:MM:SS`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a trip timestamp in the fixed input format.
///
/// # Example
/// ```
/// use dock_occupancy_core_rs::core::time::parse_timestamp;
///
/// let ts = parse_timestamp("2022-01-01 08:15:00").unwrap();
/// assert_eq!(ts.to_string(), "2022-01-01 08:15:00");
///
/// assert!(parse_timestamp("01/01/2022 08:15").is_err());
/// ```
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
}

/// Exclusive upper bound of a simulated day: midnight of the following day.
///
/// An event timestamped exactly at this instant belongs to the next day and
/// must not enter the timeline.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use dock_occupancy_core_rs::core::time::day_end;
///
/// let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
/// assert_eq!(day_end(date).to_string(), "2022-01-02 00:00:00");
/// ```
pub fn day_end(date: NaiveDate) -> NaiveDateTime {
    (date + Duration::days(1))
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time of day")
}
