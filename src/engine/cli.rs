//! CLI command handler: scan the given paths, then report when asked.

use anyhow::Result;
use clap::CommandFactory;
use log::{debug, warn};
use std::io;
use std::path::Path;
use std::process::ExitCode;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::engine::db_ops::open_db;
use crate::index::index_roots;
use crate::report::report;
use crate::utils::{apply_file_to_opts, load_dupes_toml, setup_logging};

/// Overlay command-line values on `opts`. Flags only ever switch behaviour on.
pub fn apply_cli_to_opts(cli: &Cli, opts: &mut Opts) {
    if let Some(ref db) = cli.db {
        opts.db_path = db.clone();
    }
    if let Some(algorithm) = cli.algorithm {
        opts.algorithm = algorithm;
    }
    if let Some(sort) = cli.sort {
        opts.sort = sort;
    }
    opts.replace |= cli.replace;
    opts.include_empty |= cli.include_empty;
    opts.report |= cli.wants_report();
    opts.verbose |= cli.verbose;
}

/// Build run options: defaults < `.dupes.toml` in the current directory < CLI. Sets up logging.
fn setup_opts(cli: &Cli) -> Result<Opts> {
    let file = load_dupes_toml(Path::new("."));
    let file_verbose = match &file {
        Ok(Some(f)) => f.verbose().unwrap_or(false),
        _ => false,
    };
    setup_logging(cli.verbose || file_verbose);

    let mut opts = Opts::default();
    match file {
        Ok(Some(f)) => apply_file_to_opts(&f, &mut opts)?,
        Ok(None) => {}
        Err(e) => warn!("Ignoring config file: {:#}", e),
    }
    apply_cli_to_opts(cli, &mut opts);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    Ok(opts)
}

/// Scan positional paths (if any), then print the duplicate report when requested.
/// Prints usage and returns status 1 when there is nothing to do.
pub fn handle_run(cli: &Cli) -> Result<ExitCode> {
    let opts = setup_opts(cli)?;
    if cli.paths.is_empty() && !opts.report {
        Cli::command().print_help()?;
        return Ok(ExitCode::from(1));
    }

    let conn = open_db(&opts.db_path)?;
    if !cli.paths.is_empty() {
        let stats = index_roots(&conn, &cli.paths, &opts);
        if !opts.report {
            println!("Indexed {} new files", stats.indexed);
        }
    }
    if opts.report {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        report(&conn, opts.sort, &mut out)?;
    }
    Ok(ExitCode::SUCCESS)
}
