//! TrackTogether command-line client.
//!
//! Loads configuration, opens the snapshot-backed document store and runs
//! one command against it.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use tracktogether_core::config::{AppConfig, LogFormat, LoggingConfig};
use tracktogether_core::error::AppError;

mod app;
mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = cli.execute(config).await {
        if e.kind.is_fatal() {
            output::print_error(&e.message);
            std::process::exit(1);
        }
        output::print_warning(&e.message);
    }
}

/// Explicit `--config` file wins; otherwise layered defaults for `--env`.
fn load_configuration(cli: &Cli) -> Result<AppConfig, AppError> {
    match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(&cli.env),
    }
}

/// Initialize tracing on stderr so command output stays parseable.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
