//! Application configuration constants.
//! File names and limits in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived file names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    db_filename: String,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                db_filename: format!("{pkg}.db"),
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Default index file name, resolved against the current directory.
    pub fn db_filename(&self) -> &str {
        &self.db_filename
    }

    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Hashing ----

/// Digest I/O sizes.
pub struct HashingConsts;

impl HashingConsts {
    /// Chunk size used when the filesystem reports no preferred transfer size (bytes).
    pub const DEFAULT_CHUNK_SIZE: usize = 4096;
}

// ---- Walk ----

/// Longest path (in bytes) the walker will hand to the indexer. Longer entries are skipped.
pub const MAX_PATH_LEN: usize = 4096;

/// Suffixes SQLite appends to the index file for its side files.
pub const DB_SIDE_FILE_SUFFIXES: [&str; 3] = ["-wal", "-shm", "-journal"];
