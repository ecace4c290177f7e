use rand::{SeedableRng, rngs::StdRng};

use super::types::{HourlyProfile, gaussian_noise, seasonal_angle};

/// Day of year with the highest seasonal demand (mid-January).
const WINTER_PEAK_DAY: f64 = 15.0;

/// Residential consumption with a daily sinusoid, a seasonal swing, and noise.
///
/// # Examples
///
/// ```
/// use resiliency_sizer::profiles::{BaseLoad, HourlyProfile};
///
/// let mut load = BaseLoad::new(1.0, 0.5, 0.0, 0.2, 0.05, 42);
/// let year = load.annual();
/// assert_eq!(year.len(), 8760);
/// assert!(year.iter().all(|&kwh| kwh >= 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct BaseLoad {
    /// Average consumption (kW).
    pub base_kw: f64,
    /// Daily sinusoid amplitude (kW).
    pub amp_kw: f64,
    /// Daily sinusoid phase offset (radians).
    pub phase_rad: f64,
    /// Seasonal swing as a fraction of `base_kw`, highest in winter.
    pub seasonal_amp: f64,
    /// Gaussian noise standard deviation (kW).
    pub noise_std: f64,
    rng: StdRng,
}

impl BaseLoad {
    /// Creates a seeded base-load generator.
    ///
    /// # Arguments
    ///
    /// * `base_kw` - Average consumption in kW
    /// * `amp_kw` - Amplitude of the daily variation in kW
    /// * `phase_rad` - Phase offset of the daily variation
    /// * `seasonal_amp` - Fractional winter/summer swing of `base_kw`
    /// * `noise_std` - Noise standard deviation in kW
    /// * `seed` - RNG seed
    pub fn new(
        base_kw: f64,
        amp_kw: f64,
        phase_rad: f64,
        seasonal_amp: f64,
        noise_std: f64,
        seed: u64,
    ) -> Self {
        Self {
            base_kw: base_kw.max(0.0),
            amp_kw,
            phase_rad,
            seasonal_amp,
            noise_std: noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl HourlyProfile for BaseLoad {
    fn energy_kwh(&mut self, hour: usize) -> f64 {
        let day_pos = (hour % 24) as f64 / 24.0;
        let daily = (2.0 * std::f64::consts::PI * day_pos + self.phase_rad).sin();
        let seasonal = 1.0 + self.seasonal_amp * seasonal_angle(hour, WINTER_PEAK_DAY).cos();
        let noise = gaussian_noise(&mut self.rng, self.noise_std);

        let kw = self.base_kw * seasonal + self.amp_kw * daily + noise;
        kw.max(0.0) // one-hour step: kW == kWh
    }

    fn kind(&self) -> &'static str {
        "BaseLoad"
    }
}
