//! Database operations: schema, open, record upsert/lookup, duplicate query.

mod connection;
mod duplicates;
mod records;

pub use connection::{load_record, open_db, open_db_in_memory, record_count};
pub use duplicates::{DuplicateRow, duplicates, group_rows};
pub use records::{lookup_exists, upsert};

use crate::{SortOrder, UpsertMode};

/// Applied after `journal_mode = WAL`. Writes are not synced.
pub(crate) const PRAGMAS: &str = r#"
        PRAGMA synchronous = OFF;
        PRAGMA temp_store = MEMORY;
        "#;

/// Schema for the digest table. Other tools read this layout; keep it exact.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS dupes (
    id            INTEGER PRIMARY KEY NOT NULL,
    path          TEXT NOT NULL UNIQUE,
    digest        TEXT NOT NULL,
    size          UNSIGNED INTEGER NOT NULL,
    last_modified TEXT NOT NULL
);
"#;

pub(crate) const LOOKUP_PATH_SQL: &str = "SELECT 1 FROM dupes WHERE path = ?1 LIMIT 1";

pub(crate) const SELECT_RECORD_SQL: &str =
    "SELECT path, digest, size, last_modified FROM dupes WHERE path = ?1";

const INSERT_OR_IGNORE_SQL: &str =
    "INSERT OR IGNORE INTO dupes (path, digest, size, last_modified) VALUES (?1, ?2, ?3, ?4)";

const INSERT_OR_REPLACE_SQL: &str =
    "INSERT OR REPLACE INTO dupes (path, digest, size, last_modified) VALUES (?1, ?2, ?3, ?4)";

const DUPLICATES_BY_SIZE_SQL: &str = r#"
SELECT g.total, g.total_size, d.digest, d.path, d.size, d.last_modified
FROM dupes AS d
INNER JOIN (
    SELECT digest, COUNT(*) AS total, SUM(size) AS total_size
    FROM dupes GROUP BY digest HAVING COUNT(*) > 1
) AS g USING (digest)
ORDER BY g.total_size DESC, d.digest, d.last_modified, d.path
"#;

const DUPLICATES_BY_COUNT_SQL: &str = r#"
SELECT g.total, g.total_size, d.digest, d.path, d.size, d.last_modified
FROM dupes AS d
INNER JOIN (
    SELECT digest, COUNT(*) AS total, SUM(size) AS total_size
    FROM dupes GROUP BY digest HAVING COUNT(*) > 1
) AS g USING (digest)
ORDER BY g.total DESC, d.digest, d.last_modified, d.path
"#;

impl UpsertMode {
    pub(crate) fn sql(self) -> &'static str {
        match self {
            UpsertMode::Ignore => INSERT_OR_IGNORE_SQL,
            UpsertMode::Replace => INSERT_OR_REPLACE_SQL,
        }
    }
}

impl SortOrder {
    pub(crate) fn duplicates_sql(self) -> &'static str {
        match self {
            SortOrder::Size => DUPLICATES_BY_SIZE_SQL,
            SortOrder::Count => DUPLICATES_BY_COUNT_SQL,
        }
    }
}

/// Every statement the run uses. Prepared at open so a bad statement fails setup, not a file.
pub(crate) fn all_statements() -> [&'static str; 6] {
    [
        LOOKUP_PATH_SQL,
        SELECT_RECORD_SQL,
        UpsertMode::Ignore.sql(),
        UpsertMode::Replace.sql(),
        SortOrder::Size.duplicates_sql(),
        SortOrder::Count.duplicates_sql(),
    ]
}
