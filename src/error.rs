//! Error types shared by the sizing core and its collaborators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SizingError {
    /// Series length does not match the reference year.
    #[error("shape mismatch: expected {expected} hourly values, got {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("outage_hours must be in [1, {max}], got {hours}")]
    OutageHours { hours: usize, max: usize },

    #[error("non-finite value {value} at hour {index}")]
    NonFinite { index: usize, value: f64 },

    /// A computed capacity fell below zero. Indicates a logic defect, not bad input.
    #[error("computed negative capacity {value} at hour {index}")]
    NegativeCapacity { index: usize, value: f64 },

    #[error("invalid series data from {origin}: {reason}")]
    Ingest { origin: String, reason: String },

    #[error("series \"{name}\" not found in model")]
    UnknownSeries { name: String },

    #[error("series \"{name}\" already exists in model")]
    DuplicateSeries { name: String },

    #[error("series \"{name}\": base must be > 0, got {base}")]
    InvalidBase { name: String, base: f64 },

    #[error("{kind} profile: {reason}")]
    Profile { kind: &'static str, reason: String },

    #[error("model has no series")]
    EmptyModel,

    #[error("series metadata `{key}`: {reason}")]
    Metadata { key: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SizingError>;
