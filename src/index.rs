//! Indexing: decide per file whether to digest it, then upsert the result.

use anyhow::{Context, Result};
use log::{info, warn};
use rusqlite::Connection;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::engine::db_ops::{lookup_exists, upsert};
use crate::engine::hashing::ChunkBuffer;
use crate::engine::hex;
use crate::engine::tools::{format_mtime, is_index_file, path_to_db_string};
use crate::pipeline::{FileProbe, WalkContext, probe, summarize_run, walk_tree};
use crate::{FileRecord, Opts, RunStats, UpsertMode};

/// What happened to one path handed to [`Indexer::process`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Digest computed and a record written.
    Indexed,
    /// Path already in the index (skip-mode); no probe, no digest, no write.
    AlreadyIndexed,
    /// Not indexed: probe failed, not a regular file, empty, or path unusable as a key.
    Skipped,
    /// Digest or write failed.
    Failed,
}

/// Per-run indexing state: the index connection, run options, the reusable read buffer and tallies.
pub struct Indexer<'a> {
    conn: &'a Connection,
    opts: &'a Opts,
    buffer: ChunkBuffer,
    stats: RunStats,
}

impl<'a> Indexer<'a> {
    pub fn new(conn: &'a Connection, opts: &'a Opts) -> Self {
        Indexer {
            conn,
            opts,
            buffer: ChunkBuffer::new(),
            stats: RunStats::default(),
        }
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn buffer(&self) -> &ChunkBuffer {
        &self.buffer
    }

    /// Index one regular file. Failures are logged and counted, never returned.
    pub fn process(&mut self, path: &Path) -> ProcessOutcome {
        let outcome = match self.try_process(path) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("{:#}", e);
                ProcessOutcome::Failed
            }
        };
        self.tally(outcome);
        outcome
    }

    fn tally(&mut self, outcome: ProcessOutcome) {
        match outcome {
            ProcessOutcome::Indexed => self.stats.indexed += 1,
            ProcessOutcome::AlreadyIndexed => self.stats.already_indexed += 1,
            ProcessOutcome::Skipped => self.stats.skipped += 1,
            ProcessOutcome::Failed => self.stats.failed += 1,
        }
    }

    fn try_process(&mut self, path: &Path) -> Result<ProcessOutcome> {
        let Some(key) = path_to_db_string(path) else {
            warn!("Skipping {}: path is not valid UTF-8", path.display());
            return Ok(ProcessOutcome::Skipped);
        };
        let mode = self.opts.upsert_mode();

        // Skip-mode: a known path is never re-probed or re-digested, even if it changed.
        if mode == UpsertMode::Ignore && lookup_exists(self.conn, key)? {
            return Ok(ProcessOutcome::AlreadyIndexed);
        }

        let meta = match probe(path) {
            Ok(meta) => meta,
            Err(e) => {
                warn!("Failed to get stat information for {}: {}", key, e);
                return Ok(ProcessOutcome::Skipped);
            }
        };
        if !meta.is_regular() {
            warn!("Entry {} is not a file", key);
            return Ok(ProcessOutcome::Skipped);
        }
        if meta.size == 0 && !self.opts.include_empty {
            info!("Skipping empty file {}", key);
            return Ok(ProcessOutcome::Skipped);
        }

        let digest = self
            .digest_file(path, &meta)
            .with_context(|| format!("Failed to digest {}", key))?;
        let record = FileRecord {
            path: key.to_string(),
            digest_hex: hex::encode(&digest),
            size: meta.size,
            last_modified: format_mtime(meta.modified),
        };
        if !upsert(self.conn, &record, mode)? {
            return Ok(ProcessOutcome::AlreadyIndexed);
        }
        println!(
            "{} ({}) = {}",
            self.opts.algorithm.label(),
            record.path,
            record.digest_hex
        );
        Ok(ProcessOutcome::Indexed)
    }

    fn digest_file(&mut self, path: &Path, meta: &FileProbe) -> Result<Vec<u8>> {
        let mut file = File::open(path).context("open")?;
        let chunk = self.buffer.chunk(meta.chunk_size);
        let used = chunk.len();
        let digest = self.opts.algorithm.compute(&mut file, chunk).context("read")?;
        self.buffer.mark_used(used);
        Ok(digest)
    }

    /// Index one command-line root: directories are walked, regular files indexed directly.
    pub fn index_root(&mut self, root: &Path) {
        let meta = match probe(root) {
            Ok(meta) => meta,
            Err(e) => {
                warn!("Failed to get stat information for {}: {}", root.display(), e);
                self.stats.skipped += 1;
                return;
            }
        };
        if meta.is_dir() {
            let ctx = WalkContext::new(root, &self.opts.db_path);
            walk_tree(&ctx, |path| {
                self.process(path);
            });
        } else if meta.is_regular() {
            let ctx = WalkContext::new(root, &self.opts.db_path);
            if is_index_file(root, &ctx.index_paths) {
                warn!("Skipping {}: it is the index database", root.display());
                self.stats.skipped += 1;
                return;
            }
            self.process(root);
        } else {
            warn!("Skipping {}: not a regular file or directory", root.display());
            self.stats.skipped += 1;
        }
    }
}

/// Index every root in order and return the run's tallies.
pub fn index_roots(conn: &Connection, roots: &[PathBuf], opts: &Opts) -> RunStats {
    let mut indexer = Indexer::new(conn, opts);
    for root in roots {
        indexer.index_root(root);
    }
    let stats = indexer.stats();
    summarize_run(&stats);
    stats
}
