//! Named hourly energy series with units, role, and sizing factors.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SizingError};

/// kWh per kBtu.
pub const KWH_PER_KBTU: f64 = 0.293071;

/// Physical units a raw series is supplied in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    #[default]
    #[serde(rename = "kWh", alias = "kwh")]
    Kwh,
    #[serde(rename = "kBtu", alias = "kbtu")]
    KBtu,
}

impl Units {
    /// Multiplier converting a value in these units to kWh.
    pub fn kwh_factor(self) -> f64 {
        match self {
            Self::Kwh => 1.0,
            Self::KBtu => KWH_PER_KBTU,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kwh => "kWh",
            Self::KBtu => "kBtu",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kwh" => Ok(Self::Kwh),
            "kbtu" => Ok(Self::KBtu),
            _ => Err(format!("unknown units \"{s}\", expected \"kWh\" or \"kBtu\"")),
        }
    }
}

/// Whether a series consumes or supplies energy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesRole {
    #[default]
    Load,
    Generator,
}

impl SeriesRole {
    pub fn is_generator(self) -> bool {
        self == Self::Generator
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "Load",
            Self::Generator => "Generator",
        }
    }

    /// Sign of this role's contribution to net energy.
    fn sign(self) -> f64 {
        match self {
            Self::Load => -1.0,
            Self::Generator => 1.0,
        }
    }
}

impl fmt::Display for SeriesRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeriesRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "load" => Ok(Self::Load),
            "generator" => Ok(Self::Generator),
            _ => Err(format!("unknown role \"{s}\", expected \"load\" or \"generator\"")),
        }
    }
}

/// One named hourly series.
///
/// The profile is held in kWh as non-negative magnitudes; [`SeriesRole`]
/// decides whether it adds to or subtracts from net energy. The scaled
/// profile is `profile * scale / base`, which lets a measured profile for a
/// `base`-sized system stand in for a `scale`-sized one.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSeries {
    name: String,
    units: Units,
    role: SeriesRole,
    base: f64,
    scale: f64,
    profile: Vec<f64>,
}

impl DataSeries {
    /// Creates a series from raw values in `units`, converting them to kWh.
    pub fn from_raw(name: impl Into<String>, units: Units, role: SeriesRole, raw: &[f64]) -> Self {
        let factor = units.kwh_factor();
        Self::from_kwh(name, units, role, raw.iter().map(|v| v * factor).collect())
    }

    /// Creates a series from a profile already in kWh.
    pub fn from_kwh(
        name: impl Into<String>,
        units: Units,
        role: SeriesRole,
        profile: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            units,
            role,
            base: 1.0,
            scale: 1.0,
            profile,
        }
    }

    /// Sets the base and scale factors.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidBase`] unless `base` is finite and > 0.
    pub fn with_sizing(mut self, base: f64, scale: f64) -> Result<Self> {
        self.set_base(base)?;
        self.set_scale(scale);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn role(&self) -> SeriesRole {
        self.role
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Unscaled profile in kWh.
    pub fn profile(&self) -> &[f64] {
        &self.profile
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// # Errors
    ///
    /// Returns [`SizingError::InvalidBase`] unless `base` is finite and > 0.
    pub fn set_base(&mut self, base: f64) -> Result<()> {
        if !(base.is_finite() && base > 0.0) {
            return Err(SizingError::InvalidBase {
                name: self.name.clone(),
                base,
            });
        }
        self.base = base;
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Relabels units and role. The stored kWh profile is left untouched.
    pub fn relabel(&mut self, units: Units, role: SeriesRole) {
        self.units = units;
        self.role = role;
    }

    /// Profile multiplied by `scale / base`.
    pub fn scaled(&self) -> Vec<f64> {
        let k = self.scale / self.base;
        self.profile.iter().map(|v| v * k).collect()
    }

    /// Scaled profile signed by role: generation positive, load negative.
    pub fn contribution(&self) -> Vec<f64> {
        let k = self.role.sign() * self.scale / self.base;
        self.profile.iter().map(|v| v * k).collect()
    }

    /// String metadata describing the series, as persisted with a model.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("name".to_string(), self.name.clone()),
            ("units".to_string(), self.units.to_string()),
            ("is_gen".to_string(), self.role.to_string()),
            ("base_size".to_string(), self.base.to_string()),
            ("scale".to_string(), self.scale.to_string()),
        ])
    }

    /// Rebuilds a series from persisted metadata and its kWh profile.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::Metadata`] when a key is missing or unparseable
    /// and [`SizingError::InvalidBase`] for a non-positive base.
    pub fn from_metadata(metadata: &BTreeMap<String, String>, profile: Vec<f64>) -> Result<Self> {
        let name = meta_value(metadata, "name")?;
        let units: Units = parse_meta(metadata, "units")?;
        let role: SeriesRole = parse_meta(metadata, "is_gen")?;
        let base: f64 = parse_meta(metadata, "base_size")?;
        let scale: f64 = parse_meta(metadata, "scale")?;
        Self::from_kwh(name, units, role, profile).with_sizing(base, scale)
    }
}

impl fmt::Display for DataSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Units: {}, is: {}", self.name, self.units, self.role)
    }
}

fn meta_value<'a>(metadata: &'a BTreeMap<String, String>, key: &str) -> Result<&'a str> {
    metadata
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| SizingError::Metadata {
            key: key.to_string(),
            reason: "missing".to_string(),
        })
}

fn parse_meta<T>(metadata: &BTreeMap<String, String>, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    meta_value(metadata, key)?
        .parse()
        .map_err(|e: T::Err| SizingError::Metadata {
            key: key.to_string(),
            reason: e.to_string(),
        })
}
