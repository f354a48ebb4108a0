//! Convergence CLI - run random trials and watch statistics converge
//!
//! This is the operational entry point for the `sim_core` engine.
//!
//! # Commands
//!
//! - `convergence list` - Show the registered processes
//! - `convergence run --process <id> --count <n>` - Run trials and print statistics
//! - `convergence batch --process <id> --count <n>` - Raw outcomes plus counts
//! - `convergence check` - Print the resolved configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate owns argument parsing,
//! configuration and output; every simulation runs inside `sim_core`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use commands::{ListArgs, RunArgs, SimulationArgs};
use config::CliConfig;
pub use error::{CliError, Result};

/// Convergence simulation CLI
#[derive(Parser)]
#[command(name = "convergence")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./convergence.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered processes
    List(ListArgs),

    /// Run trials in a fresh session and print statistics
    Run(RunArgs),

    /// Run a batch request and print raw outcomes with counts
    Batch(SimulationArgs),

    /// Check the resolved configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?.with_env_override()?;
    config.validate()?;

    init_tracing(cli.verbose, &config.log_level);
    debug!(?config, "Configuration resolved");

    match cli.command {
        Commands::List(args) => commands::list::run(&config, &args),
        Commands::Run(args) => commands::run::run(&config, &args),
        Commands::Batch(args) => commands::batch::run(&config, &args),
        Commands::Check => commands::check::run(&config, cli.config.as_deref()),
    }
}

/// `RUST_LOG` wins over the configured level; `--verbose` forces debug.
fn init_tracing(verbose: bool, log_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
