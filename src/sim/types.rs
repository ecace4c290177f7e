//! Core sizing types: the hourly net-energy series, outage window, and
//! per-hour required capacity.

use std::ops::Deref;

use crate::error::{Result, SizingError};

/// Hours in the non-leap reference year.
pub const HOURS_PER_YEAR: usize = 8760;

/// Hours in one calendar day.
pub const HOURS_PER_DAY: usize = 24;

/// Days in the reference year.
pub const DAYS_PER_YEAR: usize = HOURS_PER_YEAR / HOURS_PER_DAY;

/// One year of hourly net energy (kWh), negative where consumption exceeds supply.
///
/// Construction checks the length and rejects NaN or infinite samples, so
/// downstream code can rely on exactly [`HOURS_PER_YEAR`] finite values.
///
/// # Examples
///
/// ```
/// use resiliency_sizer::sim::types::{HourlySeries, HOURS_PER_YEAR};
///
/// let series = HourlySeries::new(vec![0.0; HOURS_PER_YEAR]).unwrap();
/// assert_eq!(series.len(), HOURS_PER_YEAR);
/// assert!(HourlySeries::new(vec![0.0; 10]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    values: Vec<f64>,
}

impl HourlySeries {
    /// Wraps `values` after checking length and finiteness.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::Shape`] if the length is not [`HOURS_PER_YEAR`]
    /// and [`SizingError::NonFinite`] on the first NaN or infinite sample.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        check_shape(values.len())?;
        check_finite(&values)?;
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl Deref for HourlySeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

/// Number of consecutive hours the storage system must carry the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OutageHours(usize);

impl OutageHours {
    /// Validates that `hours` lies in `[1, HOURS_PER_YEAR]`.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::OutageHours`] otherwise. Out-of-range values are
    /// never clamped.
    pub fn new(hours: usize) -> Result<Self> {
        if hours == 0 || hours > HOURS_PER_YEAR {
            return Err(SizingError::OutageHours {
                hours,
                max: HOURS_PER_YEAR,
            });
        }
        Ok(Self(hours))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Per-hour storage capacity (kWh) needed to survive an outage starting at that hour.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredCapacity {
    outage_hours: OutageHours,
    values: Vec<f64>,
}

impl RequiredCapacity {
    /// Wraps computed values, asserting they are all non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::Shape`] on a length mismatch and
    /// [`SizingError::NegativeCapacity`] on the first negative value.
    pub fn new(outage_hours: OutageHours, values: Vec<f64>) -> Result<Self> {
        check_shape(values.len())?;
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| **v < 0.0) {
            return Err(SizingError::NegativeCapacity { index, value });
        }
        Ok(Self {
            outage_hours,
            values,
        })
    }

    pub fn outage_hours(&self) -> OutageHours {
        self.outage_hours
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Largest capacity over the year and the hour it occurs at.
    ///
    /// Ties resolve to the earliest hour.
    pub fn peak(&self) -> (usize, f64) {
        self.values
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0.0), |best, (i, v)| if v > best.1 { (i, v) } else { best })
    }
}

impl Deref for RequiredCapacity {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

pub(crate) fn check_shape(actual: usize) -> Result<()> {
    if actual != HOURS_PER_YEAR {
        return Err(SizingError::Shape {
            expected: HOURS_PER_YEAR,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn check_finite(values: &[f64]) -> Result<()> {
    match values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(SizingError::NonFinite { index, value }),
        None => Ok(()),
    }
}
