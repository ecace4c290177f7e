use std::env;
use std::path::PathBuf;

use crate::config::ScenarioConfig;

#[derive(Debug, Default)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    /// Saved model whose series replace the scenario's `[[series]]`.
    pub model: Option<PathBuf>,
    pub outage_hours: Option<usize>,
    pub daily_out: Option<PathBuf>,
    pub hourly_out: Option<PathBuf>,
    pub summary_out: Option<PathBuf>,
    pub save_model: Option<PathBuf>,
    /// List saved models in this directory and exit.
    pub list_models: Option<PathBuf>,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn set_once<T>(slot: &mut Option<T>, value: T, flag: &str) -> Result<(), String> {
    if slot.replace(value).is_some() {
        return Err(format!("{flag} provided more than once"));
    }
    Ok(())
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                set_once(&mut opts.scenario, PathBuf::from(path), flag)?;
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                set_once(&mut opts.preset, name.to_string(), flag)?;
            }
            "--model" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --model (expected a model file path)")?;
                set_once(&mut opts.model, PathBuf::from(path), flag)?;
            }
            "--outage-hours" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --outage-hours (expected hours)")?;
                let hours = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--outage-hours value \"{raw}\" is not a valid integer"))?;
                set_once(&mut opts.outage_hours, hours, flag)?;
            }
            "--daily-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --daily-out (expected a file path)")?;
                set_once(&mut opts.daily_out, PathBuf::from(path), flag)?;
            }
            "--hourly-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --hourly-out (expected a file path)")?;
                set_once(&mut opts.hourly_out, PathBuf::from(path), flag)?;
            }
            "--summary-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --summary-out (expected a file path)")?;
                set_once(&mut opts.summary_out, PathBuf::from(path), flag)?;
            }
            "--save-model" => {
                i += 1;
                let dir = args.next_or_err(i, "missing value for --save-model (expected a directory)")?;
                set_once(&mut opts.save_model, PathBuf::from(dir), flag)?;
            }
            "--list-models" => {
                i += 1;
                let dir = args.next_or_err(i, "missing value for --list-models (expected a directory)")?;
                set_once(&mut opts.list_models, PathBuf::from(dir), flag)?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.scenario.is_none() && opts.preset.is_none() {
        opts.preset = Some("demo".to_string());
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("resiliency-sizer - battery capacity for riding through grid outages");
    eprintln!();
    eprintln!("Usage: resiliency-sizer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --model <path>           Take series from a saved model file");
    eprintln!("  --outage-hours <n>       Override the outage window (hours)");
    eprintln!("  --daily-out <path>       Export daily required capacity to CSV");
    eprintln!("  --hourly-out <path>      Export hourly net energy and capacity to CSV");
    eprintln!("  --summary-out <path>     Export the daily summary table to CSV");
    eprintln!("  --save-model <dir>       Save the site model as JSON into <dir>");
    eprintln!("  --list-models <dir>      List saved models in <dir> and exit");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the demo preset is used.");
    eprintln!("Set RUST_LOG to adjust log output (default: resiliency_sizer=info).");
}
