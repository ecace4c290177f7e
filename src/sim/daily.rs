//! Daily aggregation of hourly sequences.
//!
//! Storage must cover the worst hour of a day, so each day is reduced to the
//! maximum of its hours. No smoothing or interpolation.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::calendar::{date_of_day, day_of_year};
use super::types::{RequiredCapacity, check_shape};
use crate::error::Result;

/// Peak required capacity for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPeak {
    /// Day of year, 1-based.
    pub day: u32,
    /// Calendar date in the reference year.
    pub date: NaiveDate,
    /// Largest required capacity among the day's hours (kWh).
    pub required_kwh: f64,
}

/// One [`DailyPeak`] per day of the reference year, ordered by day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCapacity {
    days: Vec<DailyPeak>,
}

impl DailyCapacity {
    pub fn days(&self) -> &[DailyPeak] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Peak for a 1-based day of year.
    pub fn get(&self, day: u32) -> Option<f64> {
        self.days
            .iter()
            .find(|d| d.day == day)
            .map(|d| d.required_kwh)
    }

    /// Day with the largest peak; earliest day wins ties.
    pub fn worst_day(&self) -> Option<DailyPeak> {
        self.days.iter().copied().fold(None, |best, d| match best {
            Some(b) if b.required_kwh >= d.required_kwh => Some(b),
            _ => Some(d),
        })
    }

    /// Mean of the daily peaks, 0.0 when empty.
    pub fn mean_peak(&self) -> f64 {
        if self.days.is_empty() {
            return 0.0;
        }
        self.days.iter().map(|d| d.required_kwh).sum::<f64>() / self.days.len() as f64
    }

    /// Number of days whose peak is strictly positive.
    pub fn days_requiring_storage(&self) -> usize {
        self.days.iter().filter(|d| d.required_kwh > 0.0).count()
    }
}

/// Reduces a year of per-hour required capacity to one maximum per day.
///
/// Hour `i` belongs to day `ceil((i + 1) / 24)`, hour 0 being
/// 2023-01-01 00:00. An 8760-hour input yields exactly 365 days.
///
/// # Errors
///
/// Returns [`crate::SizingError::Shape`] when `required_capacity` is not
/// exactly one reference year long.
///
/// # Examples
///
/// ```
/// use resiliency_sizer::sim::daily::aggregate_to_daily;
/// use resiliency_sizer::sim::types::HOURS_PER_YEAR;
///
/// let mut hourly = vec![0.0; HOURS_PER_YEAR];
/// hourly[30] = 12.5;
/// let daily = aggregate_to_daily(&hourly).unwrap();
/// assert_eq!(daily.len(), 365);
/// assert_eq!(daily.get(2), Some(12.5));
/// ```
pub fn aggregate_to_daily(required_capacity: &[f64]) -> Result<DailyCapacity> {
    let peaks = daily_max(required_capacity)?;
    let days = peaks
        .into_iter()
        .map(|(day, required_kwh)| DailyPeak {
            day,
            date: date_of_day(day),
            required_kwh,
        })
        .collect();
    Ok(DailyCapacity { days })
}

impl RequiredCapacity {
    /// Daily peaks of this sequence. See [`aggregate_to_daily`].
    pub fn to_daily(&self) -> Result<DailyCapacity> {
        aggregate_to_daily(self.values())
    }
}

/// Per-day maximum of one reference-year sequence, keyed by day of year.
///
/// # Errors
///
/// Returns [`crate::SizingError::Shape`] on a length mismatch.
pub fn daily_max(values: &[f64]) -> Result<BTreeMap<u32, f64>> {
    check_shape(values.len())?;
    let mut peaks = BTreeMap::new();
    for (hour, &v) in values.iter().enumerate() {
        peaks
            .entry(day_of_year(hour))
            .and_modify(|p: &mut f64| *p = p.max(v))
            .or_insert(v);
    }
    Ok(peaks)
}

/// Daily maxima of several named hourly columns side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    days: Vec<u32>,
    columns: Vec<(String, Vec<f64>)>,
}

impl DailySummary {
    /// Reduces each named column to daily maxima.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SizingError::Shape`] if any column is not one
    /// reference year long.
    pub fn from_columns<'a, I>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [f64])>,
    {
        let mut days = Vec::new();
        let mut out = Vec::new();
        for (name, values) in columns {
            let peaks = daily_max(values)?;
            if days.is_empty() {
                days = peaks.keys().copied().collect();
            }
            out.push((name.to_string(), peaks.into_values().collect()));
        }
        Ok(Self { days, columns: out })
    }

    pub fn days(&self) -> &[u32] {
        &self.days
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Values of every column for the row at `index`.
    pub fn row(&self, index: usize) -> Vec<f64> {
        self.columns
            .iter()
            .filter_map(|(_, v)| v.get(index).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SizingError;
    use crate::sim::types::{DAYS_PER_YEAR, HOURS_PER_YEAR};

    fn ramp() -> Vec<f64> {
        (0..HOURS_PER_YEAR).map(|i| (i % 37) as f64).collect()
    }

    #[test]
    fn has_one_entry_per_day() {
        let daily = aggregate_to_daily(&ramp()).unwrap();
        assert_eq!(daily.len(), DAYS_PER_YEAR);
        assert_eq!(daily.days()[0].day, 1);
        assert_eq!(daily.days()[364].day, 365);
        assert_eq!(daily.days()[364].date.to_string(), "2023-12-31");
    }

    #[test]
    fn each_day_is_max_of_its_hours() {
        let hourly = ramp();
        let daily = aggregate_to_daily(&hourly).unwrap();
        for d in 1..=DAYS_PER_YEAR {
            let start = 24 * (d - 1);
            let expected = hourly[start..start + 24]
                .iter()
                .copied()
                .fold(f64::MIN, f64::max);
            assert_eq!(daily.get(d as u32), Some(expected), "day {d}");
        }
    }

    #[test]
    fn rejects_wrong_length() {
        let err = aggregate_to_daily(&[1.0; 48]).unwrap_err();
        assert!(matches!(err, SizingError::Shape { actual: 48, .. }));
    }

    #[test]
    fn worst_day_and_counts() {
        let mut hourly = vec![0.0; HOURS_PER_YEAR];
        hourly[24 * 10 + 5] = 3.0;
        hourly[24 * 40] = 9.0;
        hourly[24 * 41] = 9.0;
        let daily = aggregate_to_daily(&hourly).unwrap();
        let worst = daily.worst_day().unwrap();
        assert_eq!(worst.day, 41);
        assert_eq!(worst.required_kwh, 9.0);
        assert_eq!(daily.days_requiring_storage(), 3);
        assert!((daily.mean_peak() - 21.0 / 365.0).abs() < 1e-12);
    }

    #[test]
    fn summary_keeps_column_order() {
        let a = vec![1.0; HOURS_PER_YEAR];
        let b = ramp();
        let summary = DailySummary::from_columns([("a", a.as_slice()), ("b", b.as_slice())])
            .unwrap();
        assert_eq!(summary.column_names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(summary.days().len(), DAYS_PER_YEAR);
        assert_eq!(summary.column("a").map(<[f64]>::len), Some(DAYS_PER_YEAR));
        assert_eq!(summary.row(0), vec![1.0, 23.0]);
    }
}
