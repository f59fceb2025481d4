//! Duplicate-group query: rows sharing a digest, ordered by the chosen group key.

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::{DuplicateGroup, GroupMember, SortOrder};

/// One row of the duplicate query, before grouping.
#[derive(Clone, Debug)]
pub struct DuplicateRow {
    pub member_count: usize,
    pub total_size: u64,
    pub digest_hex: String,
    pub member: GroupMember,
}

/// All groups of two or more records sharing a digest.
///
/// Groups are ordered by `sort` (descending), then digest; members by last-modified, then path.
/// The same index always yields the same order.
pub fn duplicates(conn: &Connection, sort: SortOrder) -> Result<Vec<DuplicateGroup>> {
    let mut stmt = conn
        .prepare_cached(sort.duplicates_sql())
        .context("prepare duplicate query")?;
    let rows = stmt
        .query_map([], |row| {
            let total: i64 = row.get(0)?;
            let total_size: i64 = row.get(1)?;
            let size: i64 = row.get(4)?;
            Ok(DuplicateRow {
                member_count: total.max(0) as usize,
                total_size: total_size.max(0) as u64,
                digest_hex: row.get(2)?,
                member: GroupMember {
                    path: row.get(3)?,
                    size: size.max(0) as u64,
                    last_modified: row.get(5)?,
                },
            })
        })
        .context("run duplicate query")?;
    let mut collected = Vec::new();
    for row in rows {
        collected.push(row.context("read duplicate row")?);
    }
    Ok(group_rows(collected))
}

/// Fold ordered rows into groups. Rows of one digest are contiguous in query order.
pub fn group_rows<I>(rows: I) -> Vec<DuplicateGroup>
where
    I: IntoIterator<Item = DuplicateRow>,
{
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    for row in rows {
        if let Some(group) = groups
            .last_mut()
            .filter(|g| g.digest_hex == row.digest_hex)
        {
            group.members.push(row.member);
            continue;
        }
        groups.push(DuplicateGroup {
            digest_hex: row.digest_hex,
            member_count: row.member_count,
            total_size: row.total_size,
            members: vec![row.member],
        });
    }
    groups
}
