//! Total-time command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::timing::scan_file;

#[derive(Args)]
pub struct TotalTimeArgs {
    /// AMICA log file to scan (e.g. amicaout/out.txt)
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

pub fn run(args: TotalTimeArgs) -> Result<()> {
    let totals = scan_file(&args.path)?;
    println!("Total time in hours: {:.2}", totals.hours());
    Ok(())
}
