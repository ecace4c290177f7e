//! Scenario wiring: build a site model from config, then size its storage.

use std::path::Path;

use crate::config::{ProfileKind, ProfilesConfig, ResiliencyConfig, ScenarioConfig, SeriesConfig};
use crate::error::{Result, SizingError};
use crate::profiles::{BaseLoad, HourlyProfile, SolarPv};
use crate::series::{DataModel, DataSeries, IngestLimits, read_series_csv};
use crate::sim::daily::{DailyCapacity, DailySummary};
use crate::sim::report::SizingReport;
use crate::sim::resiliency::compute_required_capacity;
use crate::sim::types::{HourlySeries, RequiredCapacity};

/// Summary column holding hourly net energy.
pub const NET_ENERGY_COLUMN: &str = "Net Energy";
/// Summary column holding per-hour required capacity.
pub const REQUIRED_CAPACITY_COLUMN: &str = "Required Capacity";

/// Everything one sizing run produces.
#[derive(Debug, Clone)]
pub struct SizingRun {
    pub model: DataModel,
    pub net_energy: HourlySeries,
    pub capacity: RequiredCapacity,
    pub daily: DailyCapacity,
    /// Daily maxima of every scaled series, net energy, and required capacity.
    pub summary: DailySummary,
    pub report: SizingReport,
}

/// Builds the site model described by `cfg`.
///
/// File paths in `[[series]]` are resolved against `base_dir`. Synthetic
/// series use `profiles.seed` offset by their position in the list.
///
/// # Errors
///
/// Returns ingestion errors for bad series files, [`SizingError::Profile`]
/// for impossible synthetic parameters, and model errors for duplicate
/// names or invalid sizing factors.
pub fn build_model(cfg: &ScenarioConfig, base_dir: &Path) -> Result<DataModel> {
    let limits = IngestLimits::with_max_file_size_mb(cfg.ingest.max_file_size_mb);
    let mut model = DataModel::new(cfg.resiliency.model_name.clone());

    for (i, sc) in cfg.series.iter().enumerate() {
        let series = match (&sc.path, sc.profile) {
            (Some(path), _) => {
                let raw = read_series_csv(&base_dir.join(path), &limits)?;
                DataSeries::from_raw(sc.name.clone(), sc.units, sc.role, &raw)
            }
            (None, Some(kind)) => {
                let seed = cfg.profiles.seed.wrapping_add(i as u64);
                let values = synthesize(kind, &cfg.profiles, seed)?;
                DataSeries::from_kwh(sc.name.clone(), sc.units, sc.role, values)
            }
            (None, None) => {
                return Err(SizingError::Ingest {
                    origin: format!("series \"{}\"", sc.name),
                    reason: "no `path` or `profile` given".to_string(),
                });
            }
        };
        model.add_series(series.with_sizing(sc.base, sc.scale)?)?;
        log_series(sc);
    }

    Ok(model)
}

fn synthesize(kind: ProfileKind, profiles: &ProfilesConfig, seed: u64) -> Result<Vec<f64>> {
    let mut profile: Box<dyn HourlyProfile> = match kind {
        ProfileKind::Baseload => {
            let bl = &profiles.baseload;
            Box::new(BaseLoad::new(
                bl.base_kw,
                bl.amp_kw,
                bl.phase_rad,
                bl.seasonal_amp,
                bl.noise_std,
                seed,
            ))
        }
        ProfileKind::Solar => {
            let sol = &profiles.solar;
            Box::new(SolarPv::new(
                sol.kw_peak,
                sol.day_length_h,
                sol.day_length_swing_h,
                sol.noise_std,
                seed,
            )?)
        }
    };
    tracing::debug!(kind = profile.kind(), seed, "synthesizing profile");
    Ok(profile.annual())
}

fn log_series(sc: &SeriesConfig) {
    let source = match (&sc.path, sc.profile) {
        (Some(p), _) => p.display().to_string(),
        (None, Some(ProfileKind::Baseload)) => "baseload profile".to_string(),
        (None, Some(ProfileKind::Solar)) => "solar profile".to_string(),
        (None, None) => String::new(),
    };
    tracing::debug!(name = %sc.name, role = %sc.role, %source, scale = sc.scale, "added series");
}

/// Sizes storage for `model` over the configured outage window.
///
/// # Errors
///
/// Returns [`SizingError::EmptyModel`] for a model without series,
/// [`SizingError::OutageHours`] for an out-of-range window, and shape
/// errors if a series is not one reference year long.
pub fn run_sizing(model: DataModel, cfg: &ResiliencyConfig) -> Result<SizingRun> {
    let net_energy = model.net_energy(cfg.fixed_gen_kw)?;
    let capacity = compute_required_capacity(&net_energy, cfg.outage_hours)?;
    let daily = capacity.to_daily()?;

    let scaled: Vec<(String, Vec<f64>)> = model
        .series()
        .iter()
        .map(|s| (s.name().to_string(), s.scaled()))
        .collect();
    let columns = scaled
        .iter()
        .map(|(name, values)| (name.as_str(), values.as_slice()))
        .chain([
            (NET_ENERGY_COLUMN, net_energy.values()),
            (REQUIRED_CAPACITY_COLUMN, capacity.values()),
        ]);
    let summary = DailySummary::from_columns(columns)?;

    let report = SizingReport::from_results(&net_energy, &capacity, &daily);
    tracing::info!(
        model = model.name(),
        outage_hours = cfg.outage_hours,
        required_kwh = report.required_capacity_kwh,
        worst_hour = report.worst_hour,
        "sizing complete"
    );

    Ok(SizingRun {
        model,
        net_energy,
        capacity,
        daily,
        summary,
        report,
    })
}
