//! Seeded synthetic annual profiles for presets and tests.

/// Residential consumption profile generator.
pub mod baseload;
/// Rooftop solar generation profile generator.
pub mod solar;
pub mod types;

pub use baseload::BaseLoad;
pub use solar::SolarPv;
pub use types::HourlyProfile;
