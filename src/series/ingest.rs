//! CSV ingestion gate for hourly series files.
//!
//! Accepted files are headerless, single-column, exactly one reference year
//! of rows, every value a finite number, and below a size cap.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::error::{Result, SizingError};
use crate::sim::types::HOURS_PER_YEAR;

/// Default file size cap in MiB.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

/// Limits applied when reading a series file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestLimits {
    /// Largest accepted file size in bytes.
    pub max_file_size_bytes: u64,
    /// Exact number of rows required.
    pub expected_rows: usize,
}

impl IngestLimits {
    pub fn with_max_file_size_mb(max_file_size_mb: u64) -> Self {
        Self {
            max_file_size_bytes: max_file_size_mb.saturating_mul(1024 * 1024),
            ..Self::default()
        }
    }
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024,
            expected_rows: HOURS_PER_YEAR,
        }
    }
}

/// Checks a series file without keeping its values.
///
/// # Errors
///
/// See [`read_series_csv`].
pub fn validate_csv(path: &Path, limits: &IngestLimits) -> Result<()> {
    read_series_csv(path, limits).map(|_| ())
}

/// Reads and validates a single-column hourly series file.
///
/// # Errors
///
/// Returns [`SizingError::Io`] if the file cannot be opened and
/// [`SizingError::Ingest`] describing the first violation otherwise.
pub fn read_series_csv(path: &Path, limits: &IngestLimits) -> Result<Vec<f64>> {
    let origin = format!("\"{}\"", path.display());
    let size = fs::metadata(path)?.len();
    if size > limits.max_file_size_bytes {
        return Err(SizingError::Ingest {
            origin,
            reason: format!(
                "file is {size} bytes, limit is {} bytes",
                limits.max_file_size_bytes
            ),
        });
    }
    let values = parse_series(File::open(path)?, &origin, limits.expected_rows)?;
    tracing::debug!(path = %path.display(), rows = values.len(), "read series file");
    Ok(values)
}

/// Parses single-column series data from any reader.
///
/// `origin` names the data source in error messages.
///
/// # Errors
///
/// Returns [`SizingError::Ingest`] for a row with more than one column, a
/// value that is not a finite number, or a row count other than
/// `expected_rows`.
pub fn parse_series<R: Read>(reader: R, origin: &str, expected_rows: usize) -> Result<Vec<f64>> {
    let fail = |reason: String| SizingError::Ingest {
        origin: origin.to_string(),
        reason,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values = Vec::with_capacity(expected_rows);
    for (i, record) in rdr.records().enumerate() {
        let row = i + 1;
        let record = record?;
        if record.len() != 1 {
            return Err(fail(format!(
                "row {row}: expected 1 column, found {}",
                record.len()
            )));
        }
        if values.len() == expected_rows {
            return Err(fail(format!("more than {expected_rows} rows")));
        }
        let field = &record[0];
        let value: f64 = field
            .parse()
            .map_err(|_| fail(format!("row {row}: \"{field}\" is not a number")))?;
        if !value.is_finite() {
            return Err(fail(format!("row {row}: value {field} is out of range")));
        }
        values.push(value);
    }

    if values.len() != expected_rows {
        return Err(fail(format!(
            "expected {expected_rows} rows, found {}",
            values.len()
        )));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> String {
        (0..n).map(|i| format!("{}\n", i as f64 * 0.5)).collect()
    }

    #[test]
    fn accepts_exact_year() {
        let data = rows(HOURS_PER_YEAR);
        let values = parse_series(data.as_bytes(), "test", HOURS_PER_YEAR).unwrap();
        assert_eq!(values.len(), HOURS_PER_YEAR);
        assert_eq!(values[3], 1.5);
    }

    #[test]
    fn accepts_integers() {
        let values = parse_series("1\n-2\n3\n".as_bytes(), "test", 3).unwrap();
        assert_eq!(values, vec![1.0, -2.0, 3.0]);
    }

    #[test]
    fn rejects_short_file() {
        let err = parse_series(rows(10).as_bytes(), "test", 12).unwrap_err();
        assert!(err.to_string().contains("expected 12 rows, found 10"));
    }

    #[test]
    fn rejects_long_file() {
        let err = parse_series(rows(13).as_bytes(), "test", 12).unwrap_err();
        assert!(err.to_string().contains("more than 12 rows"));
    }

    #[test]
    fn rejects_extra_column() {
        let err = parse_series("1\n2,3\n".as_bytes(), "test", 2).unwrap_err();
        assert!(err.to_string().contains("row 2: expected 1 column, found 2"));
    }

    #[test]
    fn rejects_text_and_overflow() {
        let err = parse_series("1\nabc\n".as_bytes(), "test", 2).unwrap_err();
        assert!(err.to_string().contains("row 2"));
        let err = parse_series("1e400\n".as_bytes(), "test", 1).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        let err = parse_series("NaN\n".as_bytes(), "test", 1).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn enforces_file_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("load.csv");
        fs::write(&path, rows(HOURS_PER_YEAR)).unwrap();

        let tight = IngestLimits {
            max_file_size_bytes: 100,
            ..IngestLimits::default()
        };
        assert!(matches!(
            validate_csv(&path, &tight),
            Err(SizingError::Ingest { .. })
        ));
        assert!(validate_csv(&path, &IngestLimits::default()).is_ok());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_series_csv(Path::new("/nonexistent/load.csv"), &IngestLimits::default())
            .unwrap_err();
        assert!(matches!(err, SizingError::Io(_)));
    }
}
