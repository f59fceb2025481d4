//! Dupes: find duplicate files by content, with an incremental SQLite digest index

pub mod engine;
pub mod index;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use anyhow::Context;
use log::debug;
use std::path::PathBuf;

/// Result alias used by public dupes API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Index `roots` into the database at `opts.db_path` and return the run's tallies.
///
/// Directories are walked recursively; regular files are indexed directly. Per-file problems are
/// logged and counted in [`RunStats`]; only failing to open the index is an error.
pub fn scan(roots: &[PathBuf], opts: &Opts) -> Result<RunStats> {
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    let conn = engine::open_db(&opts.db_path)?;
    Ok(index::index_roots(&conn, roots, opts))
}

/// Duplicate groups currently in the index at `opts.db_path`, ordered by `opts.sort`.
pub fn find_duplicates(opts: &Opts) -> Result<Vec<DuplicateGroup>> {
    let conn = engine::open_db(&opts.db_path)?;
    engine::duplicates(&conn, opts.sort).context("query duplicates")
}
