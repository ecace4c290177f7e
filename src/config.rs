//! TOML-based scenario configuration and preset definitions.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::profiles::solar::day_length_in_range;
use crate::series::ingest::DEFAULT_MAX_FILE_SIZE_MB;
use crate::series::types::{SeriesRole, Units};
use crate::sim::types::HOURS_PER_YEAR;

/// Top-level scenario configuration parsed from TOML.
///
/// Every section has defaults. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or start from a built-in preset with
/// [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Outage window and net-energy parameters.
    #[serde(default)]
    pub resiliency: ResiliencyConfig,
    /// Limits for series files.
    #[serde(default)]
    pub ingest: IngestConfig,
    /// Parameters for synthetic series.
    #[serde(default)]
    pub profiles: ProfilesConfig,
    /// Input series, combined into net energy.
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

/// Outage window and net-energy parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResiliencyConfig {
    /// Hours of self-sufficiency the storage must guarantee, in `[1, 8760]`.
    pub outage_hours: usize,
    /// Fixed generation available every hour (kW), e.g. a backup generator.
    pub fixed_gen_kw: f64,
    /// Name of the site model built from this scenario.
    pub model_name: String,
}

impl Default for ResiliencyConfig {
    fn default() -> Self {
        Self {
            outage_hours: 24,
            fixed_gen_kw: 0.0,
            model_name: "site".to_string(),
        }
    }
}

/// Limits for series files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    /// Largest accepted series file (MiB).
    pub max_file_size_mb: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}

/// Parameters for synthetic series.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfilesConfig {
    /// Master random seed; each synthetic series offsets it by its position.
    pub seed: u64,
    pub baseload: BaseloadConfig,
    pub solar: SolarConfig,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            baseload: BaseloadConfig::default(),
            solar: SolarConfig::default(),
        }
    }
}

/// Synthetic base-load parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaseloadConfig {
    /// Average consumption (kW).
    pub base_kw: f64,
    /// Daily sinusoid amplitude (kW).
    pub amp_kw: f64,
    /// Daily sinusoid phase (radians).
    pub phase_rad: f64,
    /// Seasonal swing as a fraction of `base_kw`.
    pub seasonal_amp: f64,
    /// Gaussian noise standard deviation (kW).
    pub noise_std: f64,
}

impl Default for BaseloadConfig {
    fn default() -> Self {
        Self {
            base_kw: 1.2,
            amp_kw: 0.6,
            phase_rad: 1.2,
            seasonal_amp: 0.25,
            noise_std: 0.1,
        }
    }
}

/// Synthetic solar parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Output at solar noon (kW).
    pub kw_peak: f64,
    /// Mean daylight length (hours).
    pub day_length_h: f64,
    /// Seasonal daylight swing (hours).
    pub day_length_swing_h: f64,
    /// Multiplicative noise standard deviation.
    pub noise_std: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            kw_peak: 5.0,
            day_length_h: 12.0,
            day_length_swing_h: 3.0,
            noise_std: 0.15,
        }
    }
}

/// Built-in synthetic profile kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Baseload,
    Solar,
}

/// One input series: a CSV file or a synthetic profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesConfig {
    /// Display name, unique within the scenario.
    pub name: String,
    /// Units of the file values.
    #[serde(default)]
    pub units: Units,
    /// Load or generator.
    #[serde(default)]
    pub role: SeriesRole,
    /// Size of the system the profile was measured on.
    #[serde(default = "one")]
    pub base: f64,
    /// Size of the system being modelled.
    #[serde(default = "one")]
    pub scale: f64,
    /// Headerless single-column CSV, relative to the scenario file.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Synthetic profile used instead of a file.
    #[serde(default)]
    pub profile: Option<ProfileKind>,
}

fn one() -> f64 {
    1.0
}

impl SeriesConfig {
    fn synthetic(name: &str, role: SeriesRole, profile: ProfileKind, scale: f64) -> Self {
        Self {
            name: name.to_string(),
            units: Units::Kwh,
            role,
            base: 1.0,
            scale,
            path: None,
            profile: Some(profile),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"resiliency.outage_hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Demo site: house load and rooftop PV, one-day outage.
    pub fn demo() -> Self {
        Self {
            series: vec![
                SeriesConfig::synthetic("House Load", SeriesRole::Load, ProfileKind::Baseload, 1.0),
                SeriesConfig::synthetic("Rooftop PV", SeriesRole::Generator, ProfileKind::Solar, 1.0),
            ],
            ..Self::default()
        }
    }

    /// Critical facility: heavier load, small PV, three-day outage.
    pub fn critical_72h() -> Self {
        Self {
            resiliency: ResiliencyConfig {
                outage_hours: 72,
                fixed_gen_kw: 0.5,
                model_name: "critical".to_string(),
            },
            profiles: ProfilesConfig {
                baseload: BaseloadConfig {
                    base_kw: 3.0,
                    amp_kw: 0.8,
                    seasonal_amp: 0.15,
                    ..BaseloadConfig::default()
                },
                solar: SolarConfig {
                    kw_peak: 4.0,
                    ..SolarConfig::default()
                },
                ..ProfilesConfig::default()
            },
            series: vec![
                SeriesConfig::synthetic("Facility Load", SeriesRole::Load, ProfileKind::Baseload, 1.0),
                SeriesConfig::synthetic("Carport PV", SeriesRole::Generator, ProfileKind::Solar, 2.0),
            ],
            ..Self::default()
        }
    }

    /// Overnight ride-through: evening peak load, 12-hour outage.
    pub fn overnight() -> Self {
        Self {
            resiliency: ResiliencyConfig {
                outage_hours: 12,
                model_name: "overnight".to_string(),
                ..ResiliencyConfig::default()
            },
            profiles: ProfilesConfig {
                baseload: BaseloadConfig {
                    amp_kw: 0.9,
                    phase_rad: 3.5,
                    ..BaseloadConfig::default()
                },
                ..ProfilesConfig::default()
            },
            ..Self::demo()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "critical_72h", "overnight"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "critical_72h" => Ok(Self::critical_72h()),
            "overnight" => Ok(Self::overnight()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut push = |field: String, message: String| errors.push(ConfigError { field, message });

        let r = &self.resiliency;
        if r.outage_hours == 0 || r.outage_hours > HOURS_PER_YEAR {
            push(
                "resiliency.outage_hours".into(),
                format!("must be in [1, {HOURS_PER_YEAR}], got {}", r.outage_hours),
            );
        }
        if !r.fixed_gen_kw.is_finite() {
            push("resiliency.fixed_gen_kw".into(), "must be finite".into());
        }
        if r.model_name.trim().is_empty() {
            push("resiliency.model_name".into(), "must not be empty".into());
        }

        if self.ingest.max_file_size_mb == 0 {
            push("ingest.max_file_size_mb".into(), "must be > 0".into());
        }

        let bl = &self.profiles.baseload;
        if !(bl.base_kw.is_finite() && bl.base_kw >= 0.0) {
            push("profiles.baseload.base_kw".into(), "must be finite and >= 0".into());
        }
        if !(bl.noise_std.is_finite() && bl.noise_std >= 0.0) {
            push("profiles.baseload.noise_std".into(), "must be finite and >= 0".into());
        }
        for (field, value) in [
            ("amp_kw", bl.amp_kw),
            ("phase_rad", bl.phase_rad),
            ("seasonal_amp", bl.seasonal_amp),
        ] {
            if !value.is_finite() {
                push(format!("profiles.baseload.{field}"), "must be finite".into());
            }
        }

        let sol = &self.profiles.solar;
        if !(sol.kw_peak.is_finite() && sol.kw_peak >= 0.0) {
            push("profiles.solar.kw_peak".into(), "must be finite and >= 0".into());
        }
        if !(sol.noise_std.is_finite() && sol.noise_std >= 0.0) {
            push("profiles.solar.noise_std".into(), "must be finite and >= 0".into());
        }
        if !day_length_in_range(sol.day_length_h, sol.day_length_swing_h) {
            push(
                "profiles.solar.day_length_h".into(),
                "day_length_h +/- day_length_swing_h must be finite and stay within (0, 24]"
                    .into(),
            );
        }

        let mut seen = HashSet::new();
        for (i, s) in self.series.iter().enumerate() {
            let at = format!("series[{i}]");
            if s.name.trim().is_empty() {
                push(format!("{at}.name"), "must not be empty".into());
            } else if !seen.insert(s.name.as_str()) {
                push(format!("{at}.name"), format!("duplicate series name \"{}\"", s.name));
            }
            if !(s.base.is_finite() && s.base > 0.0) {
                push(format!("{at}.base"), "must be > 0".into());
            }
            if !(s.scale.is_finite() && s.scale >= 0.0) {
                push(format!("{at}.scale"), "must be >= 0".into());
            }
            match (&s.path, &s.profile) {
                (Some(_), Some(_)) => push(
                    format!("{at}.path"),
                    "`path` and `profile` are mutually exclusive".into(),
                ),
                (None, None) => push(
                    format!("{at}.path"),
                    "one of `path` or `profile` is required".into(),
                ),
                _ => {}
            }
        }

        errors
    }
}
