//! Duplicate report: print groups of identical files from the index.

use anyhow::{Context, Result};
use log::debug;
use rusqlite::Connection;
use std::io::Write;

use crate::engine::db_ops::duplicates;
use crate::engine::tools::human_size;
use crate::{DuplicateGroup, SortOrder};

/// Line printed when no digest is shared by two or more paths.
pub const NO_DUPLICATES: &str = "No duplicates found";

/// Query duplicate groups ordered by `sort` and write them to `out`. Read-only. Returns the group count.
pub fn report<W: Write>(conn: &Connection, sort: SortOrder, out: &mut W) -> Result<usize> {
    let groups = duplicates(conn, sort)?;
    debug!("{} duplicate groups (sorted by {})", groups.len(), sort);
    render_groups(out, &groups).context("write report")?;
    Ok(groups.len())
}

/// Render groups as
///
/// ```text
/// <digest> (dupes: <n>)
/// |- <path> <size> <last modified>
/// `- <path> <size> <last modified>
/// ```
pub fn render_groups<W: Write>(out: &mut W, groups: &[DuplicateGroup]) -> std::io::Result<()> {
    if groups.is_empty() {
        writeln!(out, "{}", NO_DUPLICATES)?;
        return out.flush();
    }
    for group in groups {
        writeln!(out, "{} (dupes: {})", group.digest_hex, group.member_count)?;
        let last = group.members.len().saturating_sub(1);
        for (i, member) in group.members.iter().enumerate() {
            let marker = if i == last { "`-" } else { "|-" };
            writeln!(
                out,
                "{} {} {} {}",
                marker,
                member.path,
                human_size(member.size),
                member.last_modified
            )?;
        }
    }
    out.flush()
}
