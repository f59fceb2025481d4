//! Public and internal types for the dupes API and run options.

use anyhow::bail;
use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use crate::engine::hashing::DigestAlgorithm;
use crate::utils::config::PackagePaths;

/// One row of the `dupes` table.
///
/// `path` is the identity: the index holds at most one record per path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    /// Lowercase hex, twice the digest length.
    pub digest_hex: String,
    pub size: u64,
    /// UTC, `YYYY-MM-DD HH:MM:SS`.
    pub last_modified: String,
}

/// A member of a [`DuplicateGroup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupMember {
    pub path: String,
    pub last_modified: String,
    pub size: u64,
}

/// Paths sharing one digest. Computed by query, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub digest_hex: String,
    /// Always >= 2.
    pub member_count: usize,
    /// Sum of member sizes (the group key for [`SortOrder::Size`]).
    pub total_size: u64,
    pub members: Vec<GroupMember>,
}

/// How duplicate groups are ordered in a report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Largest total group size first.
    #[default]
    Size,
    /// Most members first.
    Count,
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "size" => Ok(SortOrder::Size),
            "count" => Ok(SortOrder::Count),
            other => bail!("unknown sort order: {other:?} (expected \"size\" or \"count\")"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Size => write!(f, "size"),
            SortOrder::Count => write!(f, "count"),
        }
    }
}

/// Write behaviour when a path is already in the index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpsertMode {
    /// First write wins; later writes for the same path are ignored.
    #[default]
    Ignore,
    /// Overwrite the existing record unconditionally.
    Replace,
}

impl UpsertMode {
    pub fn from_replace(replace: bool) -> Self {
        if replace {
            UpsertMode::Replace
        } else {
            UpsertMode::Ignore
        }
    }
}

/// Per-run options. Built once at startup (defaults < `.dupes.toml` < CLI) and read-only after.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Index database location.
    pub db_path: PathBuf,
    pub algorithm: DigestAlgorithm,
    /// Recompute and overwrite records for paths already in the index.
    pub replace: bool,
    /// Index zero-byte files too.
    pub include_empty: bool,
    /// Print duplicate groups after scanning (or instead of scanning when no paths are given).
    pub report: bool,
    pub sort: SortOrder,
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Opts {
            db_path: PathBuf::from(PackagePaths::get().db_filename()),
            algorithm: DigestAlgorithm::default(),
            replace: false,
            include_empty: false,
            report: false,
            sort: SortOrder::default(),
            verbose: false,
        }
    }
}

impl Opts {
    pub fn upsert_mode(&self) -> UpsertMode {
        UpsertMode::from_replace(self.replace)
    }
}

/// Per-run tallies kept by the indexer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Records written this run.
    pub indexed: usize,
    /// Paths skipped because the index already had them (skip-mode only).
    pub already_indexed: usize,
    /// Entries not indexed by policy or probe result (not a file, empty, bad path).
    pub skipped: usize,
    /// Entries that failed while digesting or writing.
    pub failed: usize,
}

impl RunStats {
    pub fn visited(&self) -> usize {
        self.indexed + self.already_indexed + self.skipped + self.failed
    }
}
