use anyhow::{Context, Result};
use clap::Parser;
use linestat::cli::{log_filter, Cli};
use linestat::commands::{handle_run, RunConfig};
use linestat::config::load_config;
use linestat::errors::AnalysisFailure;
use linestat::progress::ProgressConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let file_settings = load_config(cli.config.as_deref()).context("loading configuration")?;

    let config = RunConfig {
        path: cli.dir.clone(),
        format: cli.format,
        list_files: !cli.summary_only,
        settings: cli.apply_overrides(file_settings),
        progress: ProgressConfig::from_env(cli.quiet),
    };
    log::debug!("effective settings: {:?}", config.settings);

    let stdout = std::io::stdout();
    let analysis = handle_run(&config, stdout.lock())?;
    report_skipped(&analysis.skipped);
    Ok(())
}

// Side effect at the edge: skipped files go to stderr, not the report
fn report_skipped(skipped: &[AnalysisFailure]) {
    if skipped.is_empty() {
        return;
    }
    eprintln!("skipped {} unreadable file(s):", skipped.len());
    for failure in skipped {
        eprintln!("  {}", failure.error);
    }
}

fn init_logging(verbosity: u8) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(verbosity)))
        .format_timestamp(None)
        .init();
}

fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .downcast_ref::<linestat::errors::Error>()
        .map(|e| e.exit_code())
        .unwrap_or(1)
        .clamp(1, 255) as u8
}
