//! fastica-tools: configuration and log utilities for the Fast ICA pipeline

use anyhow::Result;

fn main() -> Result<()> {
    fastica_tools::cli::run()
}
