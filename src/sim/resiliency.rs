//! Resiliency window calculator.
//!
//! For every start hour, finds the largest energy deficit a battery would
//! have to cover if the grid went down at that hour for `outage_hours`
//! hours. The running deficit is floored at zero, so surplus hours drain it
//! but never bank negative charge. Windows that run past the last hour of
//! the year continue from hour 0.

use rayon::prelude::*;

use super::types::{HOURS_PER_YEAR, OutageHours, RequiredCapacity, check_finite, check_shape};
use super::window::SlidingSpan;
use crate::error::Result;

/// Peak of the floored running deficit over one window.
///
/// Starting from zero, each value `v` updates the accumulator to
/// `max(0, acc - v)`; the result is the largest accumulator seen. An empty
/// window yields `0.0`.
///
/// # Examples
///
/// ```
/// use resiliency_sizer::sim::resiliency::peak_floored_deficit;
///
/// assert_eq!(peak_floored_deficit(&[-5.0, -5.0, -5.0]), 15.0);
/// assert_eq!(peak_floored_deficit(&[10.0, 10.0, 0.0]), 0.0);
/// assert_eq!(peak_floored_deficit(&[-2.0, 5.0, -1.0]), 2.0);
/// ```
pub fn peak_floored_deficit(window: &[f64]) -> f64 {
    let mut acc = 0.0_f64;
    let mut peak = 0.0_f64;
    for &v in window {
        acc = (acc - v).max(0.0);
        peak = peak.max(acc);
    }
    peak
}

/// Computes the required storage capacity for every start hour of the year.
///
/// `hourly_net_energy` must hold exactly [`HOURS_PER_YEAR`] values, negative
/// where consumption exceeds supply. Runs in O(n + outage_hours) with a
/// sliding span over the window's own hourly deficits, so hours outside a
/// window never affect its value. The result matches
/// [`compute_required_capacity_by_scan`] up to floating-point rounding.
///
/// # Errors
///
/// Returns [`crate::SizingError::Shape`] for a wrong-length input,
/// [`crate::SizingError::OutageHours`] when `outage_hours` is outside
/// `[1, HOURS_PER_YEAR]`, and [`crate::SizingError::NonFinite`] for a NaN or
/// infinite sample.
///
/// # Examples
///
/// ```
/// use resiliency_sizer::sim::resiliency::compute_required_capacity;
/// use resiliency_sizer::sim::types::HOURS_PER_YEAR;
///
/// let mut net = vec![0.0; HOURS_PER_YEAR];
/// net[..3].copy_from_slice(&[-5.0, -5.0, -5.0]);
/// net[3..5].copy_from_slice(&[10.0, 10.0]);
///
/// let cap = compute_required_capacity(&net, 3).unwrap();
/// assert_eq!(cap[0], 15.0);
/// assert_eq!(cap[3], 0.0);
/// ```
pub fn compute_required_capacity(
    hourly_net_energy: &[f64],
    outage_hours: usize,
) -> Result<RequiredCapacity> {
    check_shape(hourly_net_energy.len())?;
    let hours = OutageHours::new(outage_hours)?;
    check_finite(hourly_net_energy)?;
    let h = hours.get();
    let n = hourly_net_energy.len();

    // Deficit of the wrapped year; the window starting at hour i is deficits[i..i + h].
    let deficits: Vec<f64> = hourly_net_energy
        .iter()
        .chain(&hourly_net_energy[..h])
        .map(|v| -v)
        .collect();

    let mut spans = SlidingSpan::with_capacity(h);
    for &d in &deficits[..h] {
        spans.push(d);
    }

    let mut values = Vec::with_capacity(n);
    for i in 0..n {
        values.push(spans.query().map_or(0.0, |s| s.best));
        spans.pop();
        if let Some(&next) = deficits.get(i + h) {
            spans.push(next);
        }
    }

    RequiredCapacity::new(hours, values)
}

/// Reference implementation scanning every window directly, O(n * outage_hours).
///
/// # Errors
///
/// Same as [`compute_required_capacity`].
pub fn compute_required_capacity_by_scan(
    hourly_net_energy: &[f64],
    outage_hours: usize,
) -> Result<RequiredCapacity> {
    check_shape(hourly_net_energy.len())?;
    let hours = OutageHours::new(outage_hours)?;
    check_finite(hourly_net_energy)?;
    let h = hours.get();

    let mut extended = Vec::with_capacity(HOURS_PER_YEAR + h);
    extended.extend_from_slice(hourly_net_energy);
    extended.extend_from_slice(&hourly_net_energy[..h]);

    let values = (0..HOURS_PER_YEAR)
        .map(|i| peak_floored_deficit(&extended[i..i + h]))
        .collect();
    RequiredCapacity::new(hours, values)
}

/// Computes required capacity for many independent series in parallel.
///
/// Output order follows input order. Fails as a whole if any series fails.
///
/// # Errors
///
/// Same as [`compute_required_capacity`], for the first failing series.
pub fn compute_required_capacity_batch<S>(
    series: &[S],
    outage_hours: usize,
) -> Result<Vec<RequiredCapacity>>
where
    S: AsRef<[f64]> + Sync,
{
    tracing::debug!(count = series.len(), outage_hours, "computing capacity batch");
    series
        .par_iter()
        .map(|s| compute_required_capacity(s.as_ref(), outage_hours))
        .collect()
}
