//! Per-record reads and writes. Errors are returned per call; the caller decides whether to continue.

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::{FileRecord, UpsertMode};

use super::LOOKUP_PATH_SQL;

/// True if `path` already has a record.
pub fn lookup_exists(conn: &Connection, path: &str) -> Result<bool> {
    let mut stmt = conn
        .prepare_cached(LOOKUP_PATH_SQL)
        .context("prepare lookup")?;
    stmt.exists([path])
        .with_context(|| format!("lookup record for {path}"))
}

/// Insert `record`. With [`UpsertMode::Ignore`] an existing record for the path is kept;
/// with [`UpsertMode::Replace`] it is overwritten. Returns whether a row was written.
pub fn upsert(conn: &Connection, record: &FileRecord, mode: UpsertMode) -> Result<bool> {
    let mut stmt = conn.prepare_cached(mode.sql()).context("prepare upsert")?;
    let size = i64::try_from(record.size)
        .with_context(|| format!("size {} of {} does not fit the index", record.size, record.path))?;
    let changed = stmt
        .execute((
            record.path.as_str(),
            record.digest_hex.as_str(),
            size,
            record.last_modified.as_str(),
        ))
        .with_context(|| format!("insert digest {} for {}", record.digest_hex, record.path))?;
    Ok(changed > 0)
}
