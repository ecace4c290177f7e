//! A named collection of series for one site, with JSON persistence.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::types::{DataSeries, SeriesRole};
use crate::error::{Result, SizingError};
use crate::sim::types::HourlySeries;

/// File extension of persisted models.
pub const MODEL_EXTENSION: &str = "json";

/// All series describing one site, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct DataModel {
    name: String,
    attributes: BTreeMap<String, String>,
    series: Vec<DataSeries>,
}

/// On-disk layout: file-level attributes plus per-series metadata and values.
#[derive(Debug, Serialize, Deserialize)]
struct ModelFile {
    #[serde(default)]
    attributes: BTreeMap<String, String>,
    series: Vec<SeriesRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SeriesRecord {
    metadata: BTreeMap<String, String>,
    values: Vec<f64>,
}

impl DataModel {
    /// Creates an empty model tagged with the default `building type` attribute.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::from([("building type".to_string(), "house".to_string())]),
            series: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn series(&self) -> &[DataSeries] {
        &self.series
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&DataSeries> {
        self.series.iter().find(|s| s.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut DataSeries> {
        self.series.iter_mut().find(|s| s.name() == name)
    }

    /// Adds a series.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::DuplicateSeries`] if the name is taken.
    pub fn add_series(&mut self, series: DataSeries) -> Result<()> {
        if self.get(series.name()).is_some() {
            return Err(SizingError::DuplicateSeries {
                name: series.name().to_string(),
            });
        }
        self.series.push(series);
        Ok(())
    }

    /// Renames a series, keeping names unique.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::DuplicateSeries`] if `to` is already taken by
    /// another series and [`SizingError::UnknownSeries`] if `from` is missing.
    pub fn rename_series(&mut self, from: &str, to: &str) -> Result<()> {
        if from != to && self.get(to).is_some() {
            return Err(SizingError::DuplicateSeries { name: to.to_string() });
        }
        let series = self.get_mut(from).ok_or_else(|| SizingError::UnknownSeries {
            name: from.to_string(),
        })?;
        series.rename(to);
        Ok(())
    }

    /// Removes and returns the named series.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::UnknownSeries`] if no series has that name.
    pub fn remove_series(&mut self, name: &str) -> Result<DataSeries> {
        let idx = self
            .series
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| SizingError::UnknownSeries {
                name: name.to_string(),
            })?;
        Ok(self.series.remove(idx))
    }

    /// Series with the given role, in insertion order.
    pub fn by_role(&self, role: SeriesRole) -> impl Iterator<Item = &DataSeries> {
        self.series.iter().filter(move |s| s.role() == role)
    }

    /// Hourly net energy: scaled generation minus scaled load plus a fixed
    /// baseline generation of `fixed_gen_kw` every hour.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::EmptyModel`] for a model without series,
    /// [`SizingError::Shape`] if any series is not one reference year long,
    /// and [`SizingError::NonFinite`] if the sum overflows.
    pub fn net_energy(&self, fixed_gen_kw: f64) -> Result<HourlySeries> {
        let Some(first) = self.series.first() else {
            return Err(SizingError::EmptyModel);
        };
        let mut net = vec![fixed_gen_kw; first.profile().len()];
        for s in &self.series {
            let contribution = s.contribution();
            if contribution.len() != net.len() {
                return Err(SizingError::Shape {
                    expected: net.len(),
                    actual: contribution.len(),
                });
            }
            for (n, c) in net.iter_mut().zip(contribution) {
                *n += c;
            }
        }
        HourlySeries::new(net)
    }

    /// Path this model is saved to inside `dir`.
    pub fn file_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{MODEL_EXTENSION}", self.name))
    }

    /// Writes the model to `<dir>/<name>.json` and returns the path.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::EmptyModel`] when there is nothing to save, and
    /// I/O or serialization errors otherwise.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        if self.series.is_empty() {
            return Err(SizingError::EmptyModel);
        }
        let file = ModelFile {
            attributes: self.attributes.clone(),
            series: self
                .series
                .iter()
                .map(|s| SeriesRecord {
                    metadata: s.metadata(),
                    values: s.profile().to_vec(),
                })
                .collect(),
        };

        fs::create_dir_all(dir)?;
        let path = self.file_path(dir);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut writer, &file)?;
        writer.flush()?;
        tracing::info!(path = %path.display(), series = self.series.len(), "saved model");
        Ok(path)
    }

    /// Loads a model written by [`DataModel::save`]. The model name is the file stem.
    ///
    /// # Errors
    ///
    /// Returns I/O, JSON, or metadata errors.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let file: ModelFile = serde_json::from_reader(reader)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut model = Self {
            name,
            attributes: file.attributes,
            series: Vec::with_capacity(file.series.len()),
        };
        for record in file.series {
            model.add_series(DataSeries::from_metadata(&record.metadata, record.values)?)?;
        }
        tracing::info!(path = %path.display(), series = model.series.len(), "loaded model");
        Ok(model)
    }
}

/// Lists saved model files in `dir`, sorted by file name.
///
/// # Errors
///
/// Returns [`SizingError::Io`] if the directory cannot be read.
pub fn list_models(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == MODEL_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::types::Units;
    use crate::sim::types::HOURS_PER_YEAR;

    fn load(name: &str, kwh: f64) -> DataSeries {
        DataSeries::from_kwh(name, Units::Kwh, SeriesRole::Load, vec![kwh; HOURS_PER_YEAR])
    }

    fn solar(name: &str, kwh: f64) -> DataSeries {
        DataSeries::from_kwh(name, Units::Kwh, SeriesRole::Generator, vec![kwh; HOURS_PER_YEAR])
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut m = DataModel::new("site");
        m.add_series(load("house", 1.0)).unwrap();
        let err = m.add_series(load("house", 2.0)).unwrap_err();
        assert!(matches!(err, SizingError::DuplicateSeries { .. }));
    }

    #[test]
    fn remove_unknown_series_fails() {
        let mut m = DataModel::new("site");
        assert!(matches!(
            m.remove_series("ghost"),
            Err(SizingError::UnknownSeries { .. })
        ));
    }

    #[test]
    fn net_energy_combines_roles_and_fixed_gen() {
        let mut m = DataModel::new("site");
        m.add_series(load("house", 3.0)).unwrap();
        m.add_series(load("shop", 1.0)).unwrap();
        m.add_series(solar("pv", 2.5).with_sizing(1.0, 2.0).unwrap())
            .unwrap();
        let net = m.net_energy(0.5).unwrap();
        // 5.0 + 0.5 - 3.0 - 1.0
        assert!(net.iter().all(|&v| v == 1.5));
        assert_eq!(m.by_role(SeriesRole::Load).count(), 2);
    }

    #[test]
    fn edits_through_get_mut_change_net_energy() {
        let mut m = DataModel::new("site");
        m.add_series(load("house", 2.0)).unwrap();
        m.add_series(solar("pv", 1.0)).unwrap();
        assert!(matches!(
            m.rename_series("house", "pv"),
            Err(SizingError::DuplicateSeries { .. })
        ));
        assert!(matches!(
            m.rename_series("shed", "barn"),
            Err(SizingError::UnknownSeries { .. })
        ));

        m.rename_series("house", "barn").unwrap();
        assert!(m.get("house").is_none());
        let barn = m.get_mut("barn").unwrap();
        barn.relabel(Units::Kwh, SeriesRole::Generator);
        barn.set_scale(0.5);
        // 1.0 + 2.0 * 0.5
        assert!(m.net_energy(0.0).unwrap().iter().all(|&v| v == 2.0));
        assert_eq!(m.by_role(SeriesRole::Load).count(), 0);
    }

    #[test]
    fn net_energy_rejects_mismatched_lengths() {
        let mut m = DataModel::new("site");
        m.add_series(load("house", 1.0)).unwrap();
        m.add_series(DataSeries::from_kwh("short", Units::Kwh, SeriesRole::Load, vec![1.0; 24]))
            .unwrap();
        assert!(matches!(m.net_energy(0.0), Err(SizingError::Shape { .. })));
    }

    #[test]
    fn empty_model_cannot_be_saved() {
        let dir = tempfile::tempdir().unwrap();
        let m = DataModel::new("empty");
        assert!(matches!(m.save(dir.path()), Err(SizingError::EmptyModel)));
        assert!(matches!(m.net_energy(0.0), Err(SizingError::EmptyModel)));
    }

    #[test]
    fn save_load_preserves_series_and_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = DataModel::new("cabin");
        m.set_attribute("climate", "cold");
        m.add_series(load("house", 1.25)).unwrap();
        m.add_series(solar("pv", 0.75).with_sizing(2.0, 5.0).unwrap())
            .unwrap();

        let path = m.save(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("cabin.json"));

        let back = DataModel::load(&path).unwrap();
        assert_eq!(back, m);
        assert_eq!(
            back.attributes().get("building type").map(String::as_str),
            Some("house")
        );
    }

    #[test]
    fn list_models_finds_json_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut b = DataModel::new("b");
        b.add_series(load("x", 1.0)).unwrap();
        b.save(dir.path()).unwrap();
        let mut a = DataModel::new("a");
        a.add_series(load("x", 1.0)).unwrap();
        a.save(dir.path()).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let names: Vec<String> = list_models(dir.path())
            .unwrap()
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(names, ["a.json", "b.json"]);
    }
}
