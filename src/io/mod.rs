/// CSV export of hourly, daily, and summary results.
pub mod export;
