use clap::Parser;
use std::path::PathBuf;

use crate::{DigestAlgorithm, SortOrder};

/// Find duplicate files by content digest.
#[derive(Clone, Debug, Parser)]
#[command(name = "dupes", version)]
#[command(
    about = "Index file digests under PATHs; --show lists files sharing a digest.",
    long_about = "Index file digests under PATHs into an SQLite database and list files \
                  sharing a digest. Paths already in the index are skipped unless --replace \
                  is given, so repeated scans only digest new files."
)]
pub struct Cli {
    /// Files or directories to scan.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Digest algorithm. Default: md5.
    #[arg(long, short = 'a', value_enum)]
    pub algorithm: Option<DigestAlgorithm>,

    /// Path to the index database. Default: `dupes.db` in the current directory.
    #[arg(long, short)]
    pub db: Option<PathBuf>,

    /// Recompute and replace digests of paths already in the index.
    #[arg(long, short = 'r')]
    pub replace: bool,

    /// Index zero-byte files too.
    #[arg(long, short = 'z')]
    pub include_empty: bool,

    /// Show groups of files with identical digests.
    #[arg(long, short = 's')]
    pub show: bool,

    /// Order of duplicate groups: total size or number of copies. Implies --show.
    #[arg(long, short = 'o', value_enum)]
    pub sort: Option<SortOrder>,

    /// Verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// True when the command line asks for a report.
    pub fn wants_report(&self) -> bool {
        self.show || self.sort.is_some()
    }
}
