//! Path, timestamp and size-formatting utilities

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::utils::config::DB_SIDE_FILE_SUFFIXES;

/// Format used for `last_modified` in the index.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Path as stored in the index. `None` when the path is not valid UTF-8 (it cannot be a TEXT key).
pub fn path_to_db_string(path: &Path) -> Option<&str> {
    path.to_str()
}

/// UTC `YYYY-MM-DD HH:MM:SS` at second resolution.
pub fn format_mtime(t: SystemTime) -> String {
    DateTime::<Utc>::from(t).format(TIMESTAMP_FORMAT).to_string()
}

/// Human-readable byte count: `512 B`, `1.5 KB`, `3.0 GB` (base 1024).
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Canonical paths of the index file and its SQLite side files. Used to keep the index out of its own scan.
pub fn index_file_paths(db_path: &Path) -> Vec<PathBuf> {
    let Ok(db) = db_path.canonicalize() else {
        return Vec::new();
    };
    let mut paths = vec![db.clone()];
    if let Some(name) = db.file_name().and_then(|n| n.to_str()) {
        for suffix in DB_SIDE_FILE_SUFFIXES {
            paths.push(db.with_file_name(format!("{name}{suffix}")));
        }
    }
    paths
}

/// True if `path` is one of `index_paths`. Only canonicalizes when the file name could match.
pub fn is_index_file(path: &Path, index_paths: &[PathBuf]) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    if !index_paths.iter().any(|p| p.file_name() == Some(name)) {
        return false;
    }
    path.canonicalize()
        .map(|c| index_paths.contains(&c))
        .unwrap_or(false)
}
