//! Named input series: records, CSV ingestion, and model persistence.

/// CSV ingestion gate.
pub mod ingest;
/// Site models and their JSON persistence.
pub mod model;
pub mod types;

pub use ingest::{IngestLimits, read_series_csv, validate_csv};
pub use model::{DataModel, list_models};
pub use types::{DataSeries, SeriesRole, Units};
