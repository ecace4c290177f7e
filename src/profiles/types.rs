//! Common trait and noise helper for synthetic profiles.

use rand::{Rng, rngs::StdRng};

use crate::sim::types::HOURS_PER_YEAR;

/// A source of hourly energy values over the reference year.
pub trait HourlyProfile {
    /// Energy in kWh for a zero-based hour of the year. Always >= 0.
    ///
    /// Generators with noise advance their RNG on every call, so values
    /// depend on call order.
    fn energy_kwh(&mut self, hour: usize) -> f64;

    /// Human-readable name of the profile kind.
    fn kind(&self) -> &'static str;

    /// Generates the full year, hour 0 first.
    fn annual(&mut self) -> Vec<f64> {
        (0..HOURS_PER_YEAR).map(|h| self.energy_kwh(h)).collect()
    }
}

/// Gaussian noise with mean 0 via the Box-Muller transform.
///
/// Returns 0.0 without touching the RNG when `std_dev <= 0`.
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}

/// Position within the year in radians, 0 at `peak_day` (1-based).
pub(crate) fn seasonal_angle(hour: usize, peak_day: f64) -> f64 {
    let day = (hour / 24) as f64 + 1.0;
    2.0 * std::f64::consts::PI * (day - peak_day) / 365.0
}
