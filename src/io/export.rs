//! CSV export for sizing results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::calendar::{date_of_day, timestamp};
use crate::sim::daily::{DailyCapacity, DailySummary};

/// Column header for the daily capacity export.
const DAILY_HEADER: [&str; 3] = ["day", "date", "required_kwh"];

/// Column header for the hourly export.
const HOURLY_HEADER: [&str; 4] = ["hour", "timestamp", "net_kwh", "required_kwh"];

fn create(path: &Path) -> io::Result<io::BufWriter<File>> {
    Ok(io::BufWriter::new(File::create(path)?))
}

/// Exports daily peak capacity to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_daily_csv(daily: &DailyCapacity, path: &Path) -> io::Result<()> {
    write_daily_csv(daily, create(path)?)
}

/// Writes one row per day: day of year, ISO date, and peak required kWh.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_daily_csv(daily: &DailyCapacity, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(DAILY_HEADER)?;
    for d in daily.days() {
        wtr.write_record(&[
            d.day.to_string(),
            d.date.to_string(),
            format!("{:.4}", d.required_kwh),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports hourly net energy and required capacity to a CSV file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_hourly_csv(net_energy: &[f64], required: &[f64], path: &Path) -> io::Result<()> {
    write_hourly_csv(net_energy, required, create(path)?)
}

/// Writes one row per hour. The two slices are zipped, so the row count is
/// the shorter of the two.
///
/// # Arguments
///
/// * `net_energy` - Hourly net energy (kWh, negative = deficit)
/// * `required` - Per-hour required capacity (kWh)
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_hourly_csv(net_energy: &[f64], required: &[f64], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HOURLY_HEADER)?;
    for (hour, (net, req)) in net_energy.iter().zip(required).enumerate() {
        wtr.write_record(&[
            hour.to_string(),
            timestamp(hour).format("%Y-%m-%d %H:%M").to_string(),
            format!("{net:.4}"),
            format!("{req:.4}"),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports the multi-column daily summary to a CSV file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_summary_csv(summary: &DailySummary, path: &Path) -> io::Result<()> {
    write_summary_csv(summary, create(path)?)
}

/// Writes `day,date` followed by one column per summary series.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_summary_csv(summary: &DailySummary, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let header: Vec<&str> = ["day", "date"]
        .into_iter()
        .chain(summary.column_names())
        .collect();
    wtr.write_record(&header)?;

    for (i, &day) in summary.days().iter().enumerate() {
        let mut record = vec![day.to_string(), date_of_day(day).to_string()];
        record.extend(summary.row(i).iter().map(|v| format!("{v:.4}")));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::daily::aggregate_to_daily;
    use crate::sim::types::{DAYS_PER_YEAR, HOURS_PER_YEAR};

    fn hourly() -> Vec<f64> {
        (0..HOURS_PER_YEAR).map(|i| (i % 24) as f64 * 0.5).collect()
    }

    fn lines(buf: Vec<u8>) -> Vec<String> {
        String::from_utf8(buf)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn daily_has_header_and_one_row_per_day() {
        let daily = aggregate_to_daily(&hourly()).unwrap();
        let mut buf = Vec::new();
        write_daily_csv(&daily, &mut buf).unwrap();
        let lines = lines(buf);
        assert_eq!(lines[0], "day,date,required_kwh");
        assert_eq!(lines[1], "1,2023-01-01,11.5000");
        assert_eq!(lines.len(), 1 + DAYS_PER_YEAR);
    }

    #[test]
    fn hourly_rows_carry_timestamps() {
        let net = vec![-1.0; HOURS_PER_YEAR];
        let req = hourly();
        let mut buf = Vec::new();
        write_hourly_csv(&net, &req, &mut buf).unwrap();
        let lines = lines(buf);
        assert_eq!(lines[0], "hour,timestamp,net_kwh,required_kwh");
        assert_eq!(lines[3], "2,2023-01-01 02:00,-1.0000,1.0000");
        assert_eq!(lines.len(), 1 + HOURS_PER_YEAR);
        assert!(lines[HOURS_PER_YEAR].starts_with("8759,2023-12-31 23:00,"));
    }

    #[test]
    fn summary_columns_follow_input_order() {
        let a = hourly();
        let b = vec![2.0; HOURS_PER_YEAR];
        let summary = DailySummary::from_columns([("Load", a.as_slice()), ("PV", b.as_slice())])
            .unwrap();
        let mut buf = Vec::new();
        write_summary_csv(&summary, &mut buf).unwrap();
        let lines = lines(buf);
        assert_eq!(lines[0], "day,date,Load,PV");
        assert_eq!(lines[365], "365,2023-12-31,11.5000,2.0000");
    }

    #[test]
    fn deterministic_output() {
        let daily = aggregate_to_daily(&hourly()).unwrap();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_daily_csv(&daily, &mut buf1).unwrap();
        write_daily_csv(&daily, &mut buf2).unwrap();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daily.csv");
        let daily = aggregate_to_daily(&hourly()).unwrap();
        export_daily_csv(&daily, &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let peaks: Vec<f64> = rdr
            .records()
            .map(|r| r.unwrap()[2].parse().unwrap())
            .collect();
        assert_eq!(peaks.len(), DAYS_PER_YEAR);
        assert!(peaks.iter().all(|&p| p == 11.5));
    }
}
