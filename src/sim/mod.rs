/// Hour-of-year to calendar mapping.
pub mod calendar;
/// Daily max-reduction of hourly sequences.
pub mod daily;
pub mod report;
/// Resiliency window calculator.
pub mod resiliency;
pub mod types;
pub mod window;
