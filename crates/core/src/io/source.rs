//! Positional byte sources.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Uniform positional read source.
///
/// Reads advance the position; no random access.
pub trait ByteSource {
    /// Read exactly `n` bytes, advancing the position by `n`.
    ///
    /// Fails with [`Error::ShortRead`] if the source ends first.
    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>>;

    /// Bytes left before EOF.
    fn remaining(&self) -> u64;
}

/// File-backed source.
pub struct FileSource {
    inner: BufReader<File>,
    remaining: u64,
}

impl FileSource {
    /// Open the file at `path` for reading from the start.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let remaining = file.metadata()?.len();
        Ok(FileSource {
            inner: BufReader::new(file),
            remaining,
        })
    }
}

impl ByteSource for FileSource {
    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        let mut got = 0usize;
        while got < n {
            match self.inner.read(&mut buf[got..]) {
                Ok(0) => {
                    self.remaining = 0;
                    return Err(Error::ShortRead {
                        wanted: n as u64,
                        got: got as u64,
                    });
                }
                Ok(read) => got += read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
        self.remaining = self.remaining.saturating_sub(n as u64);
        Ok(buf)
    }

    fn remaining(&self) -> u64 {
        self.remaining
    }
}

/// In-memory source over an owned byte buffer.
#[derive(Debug)]
pub struct MemorySource {
    bytes: Vec<u8>,
    pos: usize,
}

impl MemorySource {
    /// Wrap an owned byte buffer.
    pub fn new(bytes: Vec<u8>) -> Self {
        MemorySource { bytes, pos: 0 }
    }

    /// Copy a slice into a fresh source.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<Vec<u8>> for MemorySource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl ByteSource for MemorySource {
    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        let available = self.bytes.len() - self.pos;
        if n > available {
            self.pos = self.bytes.len();
            return Err(Error::ShortRead {
                wanted: n as u64,
                got: available as u64,
            });
        }
        let out = self.bytes[self.pos..self.pos + n].to_vec();
        self.pos += n;
        Ok(out)
    }

    fn remaining(&self) -> u64 {
        (self.bytes.len() - self.pos) as u64
    }
}
