use std::process::Command;

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_resiliency-sizer"))
        .args(args)
        .output()
        .expect("resiliency-sizer process should run")
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing report line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid report format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from report line `{line}`"))
}

fn required_capacity(args: &[&str]) -> f64 {
    let output = run_cli(args);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.contains("--- Resiliency Sizing Report ---"));
    parse_metric(&stdout, "Required capacity:", "kWh")
}

#[test]
fn presets_run_and_longer_outages_need_more_storage() {
    let overnight = required_capacity(&["--preset", "overnight"]);
    let demo = required_capacity(&["--preset", "demo"]);
    let demo_week = required_capacity(&["--preset", "demo", "--outage-hours", "168"]);

    assert!(demo > 0.0);
    assert!(
        demo_week > demo,
        "expected a week-long outage to need more than a day: week={demo_week:.2}, day={demo:.2}"
    );
    assert!(overnight > 0.0);
    required_capacity(&["--preset", "critical_72h"]);
}

#[test]
fn scenario_files_run() {
    for path in ["scenarios/demo.toml", "scenarios/critical_72h.toml"] {
        assert!(required_capacity(&["--scenario", path]) > 0.0, "{path}");
    }
}

#[test]
fn exports_and_saved_model_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let daily = dir.path().join("daily.csv");
    let hourly = dir.path().join("hourly.csv");
    let summary = dir.path().join("summary.csv");
    let models = dir.path().join("models");

    let first = required_capacity(&[
        "--preset",
        "demo",
        "--daily-out",
        daily.to_str().unwrap(),
        "--hourly-out",
        hourly.to_str().unwrap(),
        "--summary-out",
        summary.to_str().unwrap(),
        "--save-model",
        models.to_str().unwrap(),
    ]);

    let daily_rows = csv::Reader::from_path(&daily).unwrap().records().count();
    assert_eq!(daily_rows, 365);
    let hourly_rows = csv::Reader::from_path(&hourly).unwrap().records().count();
    assert_eq!(hourly_rows, 8760);
    let mut rdr = csv::Reader::from_path(&summary).unwrap();
    let header = rdr.headers().unwrap().clone();
    assert_eq!(header.get(0), Some("day"));
    assert_eq!(header.iter().last(), Some("Required Capacity"));

    // The demo model is named after its scenario
    let saved = models.join("site.json");
    assert!(saved.exists());
    let again = required_capacity(&["--preset", "demo", "--model", saved.to_str().unwrap()]);
    assert!((first - again).abs() < 1e-9);

    let listing = run_cli(&["--list-models", models.to_str().unwrap()]);
    assert!(listing.status.success());
    assert!(String::from_utf8_lossy(&listing.stdout).contains("site.json"));
}

#[test]
fn invalid_inputs_exit_nonzero() {
    let output = run_cli(&["--preset", "nonexistent"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));

    let output = run_cli(&["--outage-hours", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("resiliency.outage_hours"));

    let output = run_cli(&["--bogus"]);
    assert!(!output.status.success());
}
