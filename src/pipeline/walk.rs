//! Tree walker: depth-first, pre-order enumeration of regular files under one root.

use log::{debug, warn};
use std::fs::FileType;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::engine::tools::is_index_file;

use super::context::WalkContext;

/// Classification of one walk entry.
pub enum WalkOutcome {
    /// Regular file to index.
    File(PathBuf),
    /// Directory; walkdir descends into it next.
    Dir,
    /// Symlink, device, socket, fifo...
    Other { path: PathBuf, kind: &'static str },
    /// Path exceeds the length limit. `is_dir` subtrees are pruned.
    TooLong { path: PathBuf, is_dir: bool },
    /// The index database or one of its side files.
    IndexFile(PathBuf),
    /// Directory could not be read or entry vanished mid-walk.
    Err { msg: String, path: Option<PathBuf> },
}

/// Convert a walkdir result into [`WalkOutcome`].
pub fn to_outcome_walkdir(
    r: Result<walkdir::DirEntry, walkdir::Error>,
    ctx: &WalkContext,
) -> WalkOutcome {
    let entry = match r {
        Ok(entry) => entry,
        Err(err) => {
            return WalkOutcome::Err {
                msg: format!("{}", err),
                path: err.path().map(PathBuf::from),
            };
        }
    };
    let ft = entry.file_type();
    if entry.path().as_os_str().len() > ctx.max_path_len {
        return WalkOutcome::TooLong {
            path: entry.into_path(),
            is_dir: ft.is_dir(),
        };
    }
    if ft.is_dir() {
        WalkOutcome::Dir
    } else if ft.is_file() {
        if is_index_file(entry.path(), &ctx.index_paths) {
            WalkOutcome::IndexFile(entry.into_path())
        } else {
            WalkOutcome::File(entry.into_path())
        }
    } else {
        WalkOutcome::Other {
            path: entry.into_path(),
            kind: describe_file_type(ft),
        }
    }
}

/// Lazy, non-restartable sequence of the regular files under `ctx.root`.
///
/// Symlinks are not followed. Order is whatever the filesystem enumerates. Diagnostics for
/// skipped entries are logged as the walk reaches them.
pub struct TreeWalk<'a> {
    ctx: &'a WalkContext,
    inner: walkdir::IntoIter,
}

impl<'a> TreeWalk<'a> {
    pub fn new(ctx: &'a WalkContext) -> Self {
        let inner = WalkDir::new(&ctx.root)
            .follow_links(false)
            .min_depth(1)
            .into_iter();
        TreeWalk { ctx, inner }
    }
}

impl Iterator for TreeWalk<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let result = self.inner.next()?;
            match to_outcome_walkdir(result, self.ctx) {
                WalkOutcome::File(path) => return Some(path),
                WalkOutcome::Dir => {}
                WalkOutcome::Other { path, kind } => {
                    warn!("Skipping entry {} of file type {}", path.display(), kind);
                }
                WalkOutcome::TooLong { path, is_dir } => {
                    warn!(
                        "Skipping {}: path is longer than {} bytes",
                        path.display(),
                        self.ctx.max_path_len
                    );
                    if is_dir {
                        self.inner.skip_current_dir();
                    }
                }
                WalkOutcome::IndexFile(path) => {
                    debug!("Not indexing the index itself: {}", path.display());
                }
                WalkOutcome::Err { msg, path } => {
                    // Unreadable subtree: drop it and keep walking.
                    match path {
                        Some(p) => debug!("Cannot read {}: {}", p.display(), msg),
                        None => debug!("Walk error: {}", msg),
                    }
                }
            }
        }
    }
}

/// Walk `ctx.root`, calling `visit` for each regular file as it is found. Returns the number visited.
pub fn walk_tree<F>(ctx: &WalkContext, mut visit: F) -> usize
where
    F: FnMut(&std::path::Path),
{
    let mut count = 0_usize;
    for path in TreeWalk::new(ctx) {
        visit(&path);
        count += 1;
    }
    count
}

#[cfg(unix)]
fn describe_file_type(ft: FileType) -> &'static str {
    use std::os::unix::fs::FileTypeExt;
    if ft.is_symlink() {
        "symlink"
    } else if ft.is_block_device() {
        "block device"
    } else if ft.is_char_device() {
        "character device"
    } else if ft.is_fifo() {
        "fifo"
    } else if ft.is_socket() {
        "socket"
    } else {
        "unknown"
    }
}

#[cfg(not(unix))]
fn describe_file_type(ft: FileType) -> &'static str {
    if ft.is_symlink() { "symlink" } else { "unknown" }
}
