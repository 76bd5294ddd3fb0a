//! Append-only byte sinks.

use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Uniform append-only write target.
///
/// No seek, no overwrite. For file-backed sinks, bytes written so far are
/// durable on close.
pub trait ByteSink {
    /// Append `bytes` to the sink.
    fn append(&mut self, bytes: &[u8]) -> Result<()>;
}

/// File-backed sink.
///
/// Buffers writes and flushes on [`close`](FileSink::close) or drop. Close
/// explicitly to observe flush errors.
pub struct FileSink {
    inner: BufWriter<File>,
}

impl FileSink {
    /// Create (or truncate) the file at `path` and open it for appending.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(FileSink {
            inner: BufWriter::new(file),
        })
    }

    /// Flush buffered bytes and sync the file to disk.
    pub fn close(mut self) -> Result<()> {
        self.inner.flush()?;
        self.inner.get_ref().sync_all()?;
        Ok(())
    }
}

impl ByteSink for FileSink {
    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes).map_err(|e| {
            if e.kind() == ErrorKind::WriteZero {
                Error::ShortWrite {
                    requested: bytes.len() as u64,
                    written: 0,
                }
            } else {
                Error::Io(e)
            }
        })
    }
}

/// In-memory sink over an owned byte buffer.
#[derive(Debug, Default)]
pub struct MemorySink {
    bytes: Vec<u8>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes appended so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether anything has been appended.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// View the accumulated bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the sink, returning the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl ByteSink for MemorySink {
    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }
}
