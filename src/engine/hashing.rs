//! File digest strategies: MD5 (16 bytes) and SHA-1 (20 bytes) behind one interface.

use anyhow::bail;
use clap::ValueEnum;
use digest::Digest;
use md5::Md5;
use sha1::Sha1;
use std::fmt;
use std::io::{ErrorKind, Read};
use std::str::FromStr;

use crate::utils::config::HashingConsts;

/// Digest algorithm, chosen once per run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha1,
}

impl DigestAlgorithm {
    /// Digest length in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            DigestAlgorithm::Md5 => 16,
            DigestAlgorithm::Sha1 => 20,
        }
    }

    /// Label used in progress lines (`MD5 (path) = ...`).
    pub fn label(self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA1",
        }
    }

    /// Digest everything `reader` yields, reading `buffer.len()` bytes at a time.
    ///
    /// Any read error aborts the digest; no partial result is returned.
    pub fn compute<R: Read>(self, reader: &mut R, buffer: &mut [u8]) -> std::io::Result<Vec<u8>> {
        match self {
            DigestAlgorithm::Md5 => digest_stream::<Md5, R>(reader, buffer),
            DigestAlgorithm::Sha1 => digest_stream::<Sha1, R>(reader, buffer),
        }
    }
}

fn digest_stream<D: Digest, R: Read>(
    reader: &mut R,
    buffer: &mut [u8],
) -> std::io::Result<Vec<u8>> {
    let mut hasher = D::new();
    loop {
        let n = match reader.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n]);
    }
    Ok(hasher.finalize().to_vec())
}

impl FromStr for DigestAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(DigestAlgorithm::Md5),
            "sha1" | "sha-1" => Ok(DigestAlgorithm::Sha1),
            other => bail!("unknown digest algorithm: {other:?} (expected \"md5\" or \"sha1\")"),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestAlgorithm::Md5 => write!(f, "md5"),
            DigestAlgorithm::Sha1 => write!(f, "sha1"),
        }
    }
}

/// Read buffer reused across every file of a run.
///
/// The chunk size follows the file's preferred transfer size when known, otherwise the
/// last size used. The allocation only ever grows.
#[derive(Debug)]
pub struct ChunkBuffer {
    buf: Vec<u8>,
    last_chunk: usize,
}

impl Default for ChunkBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkBuffer {
    pub fn new() -> Self {
        ChunkBuffer {
            buf: Vec::new(),
            last_chunk: HashingConsts::DEFAULT_CHUNK_SIZE,
        }
    }

    /// Slice of `preferred` bytes (or the previous chunk size when `None`/0).
    pub fn chunk(&mut self, preferred: Option<usize>) -> &mut [u8] {
        let size = preferred.filter(|&n| n > 0).unwrap_or(self.last_chunk);
        if self.buf.len() < size {
            self.buf.resize(size, 0);
        }
        &mut self.buf[..size]
    }

    /// Remember `size` as the fallback for files with no preferred size. Call after a successful digest.
    pub fn mark_used(&mut self, size: usize) {
        self.last_chunk = size;
    }

    /// Bytes currently allocated.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn last_chunk(&self) -> usize {
        self.last_chunk
    }
}
