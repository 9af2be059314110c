//! Command-line interface for fastica-tools
//!
//! Provides `config` and `total-time` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::logging::LogSession;

mod config;
mod total_time;

/// Configuration and log utilities for the Fast ICA / AMICA pipeline
#[derive(Parser)]
#[command(name = "fastica-tools")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, merge and print or export the pipeline configuration
    Config(config::ConfigArgs),

    /// Sum the elapsed-time tokens of an AMICA log and report hours
    TotalTime(total_time::TotalTimeArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Dropped when run() returns, which uninstalls the subscriber.
    let _session = LogSession::bootstrap(cli.verbose);

    match cli.command {
        Commands::Config(args) => config::run(args, cli.verbose),
        Commands::TotalTime(args) => total_time::run(args),
    }
}
