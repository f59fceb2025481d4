//! Walk context: per-root settings handed to the tree walker.

use std::path::{Path, PathBuf};

use crate::engine::tools::index_file_paths;
use crate::utils::config::MAX_PATH_LEN;

/// Shared settings for one walk: root, paths never to index, path length limit.
#[derive(Clone, Debug)]
pub struct WalkContext {
    pub root: PathBuf,
    /// Canonical paths of the index file and its side files.
    pub index_paths: Vec<PathBuf>,
    pub max_path_len: usize,
}

impl WalkContext {
    pub fn new(root: &Path, db_path: &Path) -> Self {
        WalkContext {
            root: root.to_path_buf(),
            index_paths: index_file_paths(db_path),
            max_path_len: MAX_PATH_LEN,
        }
    }

    /// Override the path length limit.
    pub fn with_max_path_len(mut self, max_path_len: usize) -> Self {
        self.max_path_len = max_path_len;
        self
    }
}
