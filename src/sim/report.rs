//! Post-hoc sizing summary computed from the hourly and daily results.

use std::fmt;

use chrono::NaiveDateTime;

use super::calendar::timestamp;
use super::daily::{DailyCapacity, DailyPeak};
use super::types::RequiredCapacity;

/// Headline figures of one sizing run.
///
/// Computed after the fact from the hourly capacity sequence and its daily
/// reduction so the two can never disagree.
#[derive(Debug, Clone)]
pub struct SizingReport {
    /// Outage window the capacity covers (hours).
    pub outage_hours: usize,
    /// Storage needed to cover any outage start in the year (kWh).
    pub required_capacity_kwh: f64,
    /// Start hour of the worst outage window.
    pub worst_hour: usize,
    /// Timestamp of `worst_hour`.
    pub worst_hour_at: NaiveDateTime,
    /// Day with the largest peak, if any day exists.
    pub worst_day: Option<DailyPeak>,
    /// Mean of the daily peaks (kWh).
    pub mean_daily_peak_kwh: f64,
    /// Days whose peak requirement is above zero.
    pub days_requiring_storage: usize,
    /// Sum of all hourly deficits over the year (kWh, positive).
    pub annual_deficit_kwh: f64,
}

impl SizingReport {
    /// Builds the report.
    ///
    /// # Arguments
    ///
    /// * `net_energy` - Hourly net energy the capacity was computed from
    /// * `capacity` - Per-hour required capacity
    /// * `daily` - Daily reduction of `capacity`
    pub fn from_results(net_energy: &[f64], capacity: &RequiredCapacity, daily: &DailyCapacity) -> Self {
        let (worst_hour, required_capacity_kwh) = capacity.peak();
        let annual_deficit_kwh = net_energy.iter().filter(|&&v| v < 0.0).map(|v| -v).sum();

        Self {
            outage_hours: capacity.outage_hours().get(),
            required_capacity_kwh,
            worst_hour,
            worst_hour_at: timestamp(worst_hour),
            worst_day: daily.worst_day(),
            mean_daily_peak_kwh: daily.mean_peak(),
            days_requiring_storage: daily.days_requiring_storage(),
            annual_deficit_kwh,
        }
    }
}

impl fmt::Display for SizingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Resiliency Sizing Report ---")?;
        writeln!(f, "Outage window:         {} h", self.outage_hours)?;
        writeln!(f, "Required capacity:     {:.2} kWh", self.required_capacity_kwh)?;
        writeln!(
            f,
            "Worst outage start:    hour {} ({})",
            self.worst_hour,
            self.worst_hour_at.format("%Y-%m-%d %H:%M")
        )?;
        match self.worst_day {
            Some(d) => writeln!(
                f,
                "Worst day:             day {} ({}) at {:.2} kWh",
                d.day, d.date, d.required_kwh
            )?,
            None => writeln!(f, "Worst day:             n/a")?,
        }
        writeln!(f, "Mean daily peak:       {:.2} kWh", self.mean_daily_peak_kwh)?;
        writeln!(f, "Days needing storage:  {}", self.days_requiring_storage)?;
        write!(f, "Annual deficit:        {:.2} kWh", self.annual_deficit_kwh)
    }
}
