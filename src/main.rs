//! Resiliency sizer entry point: CLI wiring and config-driven sizing run.

use std::path::Path;
use std::process;

use tracing_subscriber::EnvFilter;

use resiliency_sizer::cli::{CliOptions, parse_args, print_usage};
use resiliency_sizer::config::ScenarioConfig;
use resiliency_sizer::io::export::{export_daily_csv, export_hourly_csv, export_summary_csv};
use resiliency_sizer::runner::{SizingRun, build_model, run_sizing};
use resiliency_sizer::series::{DataModel, list_models};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("resiliency_sizer=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

fn load_scenario(cli: &CliOptions) -> ScenarioConfig {
    let loaded = match (&cli.scenario, &cli.preset) {
        (Some(path), _) => ScenarioConfig::from_toml_file(path),
        (None, Some(name)) => ScenarioConfig::from_preset(name),
        (None, None) => Ok(ScenarioConfig::demo()),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    })
}

fn write_outputs(cli: &CliOptions, run: &SizingRun) {
    if let Some(ref path) = cli.daily_out {
        if let Err(e) = export_daily_csv(&run.daily, path) {
            fail(format!("failed to write daily CSV: {e}"));
        }
        eprintln!("Daily capacity written to {}", path.display());
    }
    if let Some(ref path) = cli.hourly_out {
        if let Err(e) = export_hourly_csv(&run.net_energy, &run.capacity, path) {
            fail(format!("failed to write hourly CSV: {e}"));
        }
        eprintln!("Hourly capacity written to {}", path.display());
    }
    if let Some(ref path) = cli.summary_out {
        if let Err(e) = export_summary_csv(&run.summary, path) {
            fail(format!("failed to write summary CSV: {e}"));
        }
        eprintln!("Daily summary written to {}", path.display());
    }
    if let Some(ref dir) = cli.save_model {
        match run.model.save(dir) {
            Ok(path) => eprintln!("Model saved to {}", path.display()),
            Err(e) => fail(format!("failed to save model: {e}")),
        }
    }
}

fn main() {
    init_tracing();

    let cli = parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        print_usage();
        process::exit(1);
    });

    if let Some(ref dir) = cli.list_models {
        match list_models(dir) {
            Ok(paths) => {
                for p in paths {
                    println!("{}", p.display());
                }
                return;
            }
            Err(e) => fail(e),
        }
    }

    let mut scenario = load_scenario(&cli);
    if let Some(hours) = cli.outage_hours {
        scenario.resiliency.outage_hours = hours;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let model = match cli.model {
        Some(ref path) => DataModel::load(path),
        None => {
            let base_dir = cli
                .scenario
                .as_deref()
                .and_then(Path::parent)
                .unwrap_or(Path::new("."));
            build_model(&scenario, base_dir)
        }
    }
    .unwrap_or_else(|e| fail(e));

    for s in model.series() {
        tracing::info!("{s}");
    }

    let run = run_sizing(model, &scenario.resiliency).unwrap_or_else(|e| fail(e));
    println!("{}", run.report);

    write_outputs(&cli, &run);
}
