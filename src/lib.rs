//! Battery sizing for grid-outage resiliency.
//!
//! Given a year of hourly net energy, finds for every hour how much stored
//! energy would carry the site through an outage starting then.

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
/// Seeded synthetic hourly profiles.
pub mod profiles;
pub mod runner;
/// Hourly series records, ingestion, and model storage.
pub mod series;
/// Window calculator, daily aggregation, and reporting.
pub mod sim;

pub use error::{Result, SizingError};
