//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rand::{Rng, SeedableRng, rngs::StdRng};

use resiliency_sizer::sim::types::HOURS_PER_YEAR;

/// One reference year of the same value.
pub fn constant_year(value: f64) -> Vec<f64> {
    vec![value; HOURS_PER_YEAR]
}

/// Surplus year with a deficit of `deficit_kwh` per hour over `hours`.
pub fn year_with_deficit(hours: std::ops::Range<usize>, deficit_kwh: f64, surplus_kwh: f64) -> Vec<f64> {
    let mut net = constant_year(surplus_kwh);
    for v in &mut net[hours] {
        *v = -deficit_kwh;
    }
    net
}

/// Uniform random net energy in `[-span, span)`, seeded.
pub fn random_year(seed: u64, span: f64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..HOURS_PER_YEAR)
        .map(|_| rng.random_range(-span..span))
        .collect()
}

/// Writes values as a headerless single-column CSV and returns the path.
pub fn write_series_csv(dir: &Path, file_name: &str, values: &[f64]) -> PathBuf {
    let path = dir.join(file_name);
    let body: String = values.iter().map(|v| format!("{v}\n")).collect();
    fs::write(&path, body).expect("fixture CSV should be writable");
    path
}
