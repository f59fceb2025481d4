//! Dupes CLI: index file digests under the given paths; --show lists duplicates.

use anyhow::Result;
use clap::Parser;
use dupes::engine::arg_parser::Cli;
use dupes::engine::handle_run;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> Result<ExitCode> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    let code = handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(code)
}
