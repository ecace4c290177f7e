use rand::{SeedableRng, rngs::StdRng};

use super::types::{HourlyProfile, gaussian_noise, seasonal_angle};
use crate::error::{Result, SizingError};

/// Day of year with the longest daylight (June solstice).
const SUMMER_PEAK_DAY: f64 = 172.0;

/// Solar generation with a half-sine daylight shape and seasonal day length.
///
/// Output is a non-negative magnitude; the series role marks it as generation.
#[derive(Debug, Clone)]
pub struct SolarPv {
    /// Output at solar noon on a clear day (kW).
    pub kw_peak: f64,
    /// Mean daylight length over the year (hours).
    pub day_length_h: f64,
    /// Half the difference between the longest and shortest day (hours).
    pub day_length_swing_h: f64,
    /// Multiplicative noise standard deviation (fraction of output).
    pub noise_std: f64,
    rng: StdRng,
}

impl SolarPv {
    /// Creates a seeded solar generator.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::Profile`] unless [`day_length_in_range`] holds
    /// and `kw_peak` and `noise_std` are finite.
    pub fn new(
        kw_peak: f64,
        day_length_h: f64,
        day_length_swing_h: f64,
        noise_std: f64,
        seed: u64,
    ) -> Result<Self> {
        let fail = |reason: String| SizingError::Profile {
            kind: "SolarPV",
            reason,
        };
        if !day_length_in_range(day_length_h, day_length_swing_h) {
            return Err(fail(format!(
                "day length {day_length_h} h +/- {day_length_swing_h} h leaves (0, 24]"
            )));
        }
        if !(kw_peak.is_finite() && noise_std.is_finite()) {
            return Err(fail("kw_peak and noise_std must be finite".to_string()));
        }
        let swing = day_length_swing_h.abs();
        Ok(Self {
            kw_peak: kw_peak.max(0.0),
            day_length_h,
            day_length_swing_h: swing,
            noise_std: noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Daylight length in hours for the day containing `hour`.
    pub fn day_length(&self, hour: usize) -> f64 {
        self.day_length_h + self.day_length_swing_h * seasonal_angle(hour, SUMMER_PEAK_DAY).cos()
    }

    /// Fraction of peak output at the middle of `hour`, 0.0 at night.
    fn daylight_frac(&self, hour: usize) -> f64 {
        let length = self.day_length(hour);
        let sunrise = 12.0 - length / 2.0;
        let t = (hour % 24) as f64 + 0.5 - sunrise;
        if t <= 0.0 || t >= length {
            return 0.0;
        }
        (std::f64::consts::PI * t / length).sin()
    }
}

/// True when `day_length_h +/- day_length_swing_h` is finite and stays
/// within `(0, 24]` hours.
pub fn day_length_in_range(day_length_h: f64, day_length_swing_h: f64) -> bool {
    let swing = day_length_swing_h.abs();
    day_length_h.is_finite()
        && swing.is_finite()
        && day_length_h - swing > 0.0
        && day_length_h + swing <= 24.0
}

impl HourlyProfile for SolarPv {
    fn energy_kwh(&mut self, hour: usize) -> f64 {
        let frac = self.daylight_frac(hour);
        if frac <= 0.0 {
            return 0.0;
        }
        let noise_mult = 1.0 + gaussian_noise(&mut self.rng, self.noise_std);
        (self.kw_peak * frac * noise_mult).max(0.0)
    }

    fn kind(&self) -> &'static str {
        "SolarPV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_at_midnight_bright_at_noon() {
        let mut pv = SolarPv::new(5.0, 12.0, 0.0, 0.0, 42).unwrap();
        assert_eq!(pv.energy_kwh(0), 0.0);
        assert_eq!(pv.energy_kwh(23), 0.0);
        assert!(pv.energy_kwh(12) > 4.9);
    }

    #[test]
    fn summer_days_are_longer() {
        let pv = SolarPv::new(5.0, 12.0, 3.0, 0.0, 42).unwrap();
        let winter = pv.day_length(24 * 355);
        let summer = pv.day_length(24 * 171);
        assert!((summer - 15.0).abs() < 1e-9);
        assert!(winter < 9.1);
    }

    #[test]
    fn symmetric_about_noon() {
        let pv = SolarPv::new(5.0, 12.0, 0.0, 0.0, 42).unwrap();
        assert!((pv.daylight_frac(9) - pv.daylight_frac(14)).abs() < 1e-12);
    }

    #[test]
    fn never_negative_with_heavy_noise() {
        let mut pv = SolarPv::new(5.0, 12.0, 2.0, 2.0, 3).unwrap();
        assert!(pv.annual().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn impossible_day_length_rejected() {
        let err = SolarPv::new(5.0, 20.0, 6.0, 0.0, 1).unwrap_err();
        assert!(matches!(err, SizingError::Profile { kind: "SolarPV", .. }));
        assert!(SolarPv::new(5.0, f64::NAN, 0.0, 0.0, 1).is_err());
        assert!(SolarPv::new(5.0, 12.0, f64::INFINITY, 0.0, 1).is_err());
        assert!(SolarPv::new(f64::NAN, 12.0, 0.0, 0.0, 1).is_err());
    }

    #[test]
    fn reports_its_kind() {
        let pv = SolarPv::new(5.0, 12.0, 0.0, 0.0, 42).unwrap();
        assert_eq!(pv.kind(), "SolarPV");
    }
}
