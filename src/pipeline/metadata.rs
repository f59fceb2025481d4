//! File probe: kind, size, mtime and preferred I/O size for one path.

use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// What a path points at (after following symlinks, like `stat`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Other,
}

/// Metadata the indexer needs for one file.
#[derive(Clone, Debug)]
pub struct FileProbe {
    pub kind: FileKind,
    pub size: u64,
    pub modified: SystemTime,
    /// Filesystem's preferred transfer size, when it reports one.
    pub chunk_size: Option<usize>,
}

impl FileProbe {
    pub fn is_regular(&self) -> bool {
        self.kind == FileKind::Regular
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }
}

/// Stat `path`. The caller decides what a failure means; nothing here retries.
pub fn probe(path: &Path) -> io::Result<FileProbe> {
    let meta = std::fs::metadata(path)?;
    let kind = if meta.is_file() {
        FileKind::Regular
    } else if meta.is_dir() {
        FileKind::Directory
    } else {
        FileKind::Other
    };
    Ok(FileProbe {
        kind,
        size: meta.len(),
        modified: meta.modified().unwrap_or(UNIX_EPOCH),
        chunk_size: preferred_chunk_size(&meta),
    })
}

#[cfg(unix)]
fn preferred_chunk_size(meta: &std::fs::Metadata) -> Option<usize> {
    use std::os::unix::fs::MetadataExt;
    usize::try_from(meta.blksize()).ok().filter(|&n| n > 0)
}

#[cfg(not(unix))]
fn preferred_chunk_size(_meta: &std::fs::Metadata) -> Option<usize> {
    None
}
