//! Fixed hour-of-year to calendar mapping for the reference year.
//!
//! Hour 0 is 2023-01-01 00:00 and each index advances one hour, so the
//! 8760 hours of the sizing year land on days 1 through 365.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

/// Calendar year used for the hour → date mapping.
pub const REFERENCE_YEAR: i32 = 2023;

/// Timestamp of the first hour of the reference year.
pub fn year_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Timestamp of a zero-based hour index.
///
/// # Examples
///
/// ```
/// use resiliency_sizer::sim::calendar::timestamp;
///
/// assert_eq!(timestamp(25).to_string(), "2023-01-02 01:00:00");
/// ```
pub fn timestamp(hour: usize) -> NaiveDateTime {
    year_start() + TimeDelta::hours(hour as i64)
}

/// Day of year (1-based) for a zero-based hour index.
pub fn day_of_year(hour: usize) -> u32 {
    timestamp(hour).ordinal()
}

/// Calendar date of a 1-based day of year.
pub fn date_of_day(day: u32) -> NaiveDate {
    NaiveDate::from_yo_opt(REFERENCE_YEAR, day).unwrap_or_default()
}
