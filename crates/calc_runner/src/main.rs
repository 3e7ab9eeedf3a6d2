//! Command-line front end for the calculation engine.
//!
//! Loads a dex JSON file and a query, runs the engine, and prints pretty JSON
//! on stdout. Logs go to stderr; set `POKE_CALC_LOG` to change the filter.
//!
//! Usage:
//!   cargo run -p calc_runner -- stats --dex dex.json --set '{"species": "Garchomp", "level": 100}'
//!   cargo run -p calc_runner -- damage --dex dex.json --query query.json
//!   cargo run -p calc_runner -- --config calc.toml speed --dex dex.json --query speed.json

mod cmd;
mod error;
mod models;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cmd::{damage, speed, stats};
use error::RunnerError;
use poke_calc::config::{load_settings, CalcSettings};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "POKE_CALC_LOG";

#[derive(Parser)]
#[command(name = "calc_runner")]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute final stats for a set
    Stats(stats::StatsArgs),

    /// Damage from one attacker against one or more defenders
    Damage(damage::DamageArgs),

    /// Effective speeds, fastest first
    Speed(speed::SpeedArgs),
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, settings: &CalcSettings) -> Result<(), RunnerError> {
    match command {
        Commands::Stats(args) => stats::execute(args, settings),
        Commands::Damage(args) => damage::execute(args, settings),
        Commands::Speed(args) => speed::execute(args, settings),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => load_settings(path),
        None => Ok(CalcSettings::default()),
    };
    init_tracing(
        settings
            .as_ref()
            .map(|s| s.log_filter.as_str())
            .unwrap_or("warn"),
    );

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        // Help goes to stdout; a failed write is not worth reporting.
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    };

    let result = settings
        .map_err(RunnerError::from)
        .and_then(|settings| run(command, &settings));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "calculation failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
