//! Open the index database and read single records.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::FileRecord;

use super::{PRAGMAS, SCHEMA, SELECT_RECORD_SQL, all_statements};

/// Prepare every statement into the connection's cache.
fn prepare_statements(conn: &Connection) -> Result<()> {
    for sql in all_statements() {
        conn.prepare_cached(sql)
            .with_context(|| format!("prepare statement: {}", sql.trim()))?;
    }
    Ok(())
}

/// Enable WAL, apply pragmas and schema (idempotent), and prepare statements.
fn apply_wal_and_schema(conn: &Connection) -> Result<()> {
    conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
        .context("enable WAL")?;
    conn.execute_batch(PRAGMAS).context("set pragmas")?;
    conn.execute_batch(SCHEMA).context("create schema")?;
    prepare_statements(conn)
}

/// Open or create the index at `path`. Any failure here is fatal for the run.
pub fn open_db(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("open database {}", path.display()))?;
    apply_wal_and_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory index with the same schema (tests and throwaway runs; no WAL).
pub fn open_db_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("open in-memory database")?;
    conn.execute_batch(SCHEMA).context("create schema")?;
    prepare_statements(&conn)?;
    Ok(conn)
}

/// Number of records in the index.
pub fn record_count(conn: &Connection) -> Result<usize> {
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM dupes", [], |row| row.get(0))
        .context("count records")?;
    Ok(n.max(0) as usize)
}

/// Read back the record stored for `path`.
pub fn load_record(conn: &Connection, path: &str) -> Result<Option<FileRecord>> {
    let mut stmt = conn.prepare_cached(SELECT_RECORD_SQL)?;
    stmt.query_row([path], |row| {
        let size: i64 = row.get(2)?;
        Ok(FileRecord {
            path: row.get(0)?,
            digest_hex: row.get(1)?,
            size: size.max(0) as u64,
            last_modified: row.get(3)?,
        })
    })
    .optional()
    .with_context(|| format!("load record for {path}"))
}
