//! The record serialization contract.
//!
//! Two derivation paths, chosen per type at definition time:
//!
//! - **Fixed-layout**: implement [`FixedLayout`] and receive the [`Record`]
//!   implementation through a blanket impl. The serialized form is the
//!   record's 4-byte-aligned byte image, [`FixedLayout::SIZE`] bytes.
//! - **Custom-layout**: implement [`Record`] directly for types with
//!   variable-length fields. Fixed-width scalars go first in declaration
//!   order, then each variable field as a u64 length prefix plus bytes.
//!
//! Encode and decode run inside [`RecordWriter`] / [`RecordReader`]
//! sessions. Their constructors are crate-private: only the bundle writer
//! and reader can open one, which keeps the alignment-and-layout invariant
//! an internal contract while record types stay freely definable downstream.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};
use crate::io::{ByteSink, ByteSource};

/// Per-type contract for moving one record's bytes.
///
/// `decode_from` builds a fresh value; both paths report bytes moved through
/// the session, so callers can verify progress against the descriptor.
pub trait Record: Sized + 'static {
    /// Stable type tag, at most 30 useful bytes. Part of the on-disk
    /// contract: changing it makes old artifacts undecodable.
    const TAG: &'static str;

    /// Nominal per-record size recorded in the section descriptor.
    ///
    /// Authoritative for fixed-layout types; advisory (a fixed-width header
    /// size) for custom-layout types.
    const NOMINAL_SIZE: u32;

    /// Whether the serialized form is the raw byte image.
    const FIXED_LAYOUT: bool;

    /// Write this record's bytes into the session.
    fn encode_to(&self, out: &mut RecordWriter<'_>) -> Result<u64>;

    /// Read one record's bytes from the session into a fresh value.
    fn decode_from(input: &mut RecordReader<'_>) -> Result<Self>;
}

/// Marker for records whose byte image is their serialized form.
///
/// `SIZE` must be the 4-byte-aligned size of the image; `store`/`load` move
/// exactly `SIZE` bytes. Implementing this trait supplies [`Record`]
/// automatically.
pub trait FixedLayout: Sized + 'static {
    /// Stable type tag (see [`Record::TAG`]).
    const TAG: &'static str;

    /// Size of the byte image. Must be a multiple of 4.
    const SIZE: usize;

    /// Copy the byte image into `buf` (`buf.len() == SIZE`), little-endian.
    fn store(&self, buf: &mut [u8]);

    /// Rebuild a value from its byte image (`buf.len() == SIZE`).
    fn load(buf: &[u8]) -> Self;
}

impl<T: FixedLayout> Record for T {
    const TAG: &'static str = <T as FixedLayout>::TAG;
    const NOMINAL_SIZE: u32 = <T as FixedLayout>::SIZE as u32;
    const FIXED_LAYOUT: bool = true;

    fn encode_to(&self, out: &mut RecordWriter<'_>) -> Result<u64> {
        debug_assert!(T::SIZE % 4 == 0, "fixed layout size must be 4-aligned");
        let mut buf = vec![0u8; T::SIZE];
        self.store(&mut buf);
        out.put_bytes(&buf)?;
        Ok(T::SIZE as u64)
    }

    fn decode_from(input: &mut RecordReader<'_>) -> Result<Self> {
        let buf = input.take_bytes(T::SIZE)?;
        Ok(T::load(&buf))
    }
}

/// Encode session over a byte sink.
///
/// Tracks bytes written so the bundle writer can verify progress.
pub struct RecordWriter<'a> {
    sink: &'a mut dyn ByteSink,
    written: u64,
}

impl<'a> RecordWriter<'a> {
    pub(crate) fn new(sink: &'a mut dyn ByteSink) -> Self {
        RecordWriter { sink, written: 0 }
    }

    /// Bytes written through this session so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Append raw bytes.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.append(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    /// Append one byte.
    pub fn put_u8(&mut self, v: u8) -> Result<()> {
        self.put_bytes(&[v])
    }

    /// Append a little-endian u16.
    pub fn put_u16(&mut self, v: u16) -> Result<()> {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, v);
        self.put_bytes(&buf)
    }

    /// Append a little-endian u32.
    pub fn put_u32(&mut self, v: u32) -> Result<()> {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, v);
        self.put_bytes(&buf)
    }

    /// Append a little-endian u64.
    pub fn put_u64(&mut self, v: u64) -> Result<()> {
        let mut buf = [0u8; 8];
        LittleEndian::write_u64(&mut buf, v);
        self.put_bytes(&buf)
    }

    /// Append a little-endian f32.
    pub fn put_f32(&mut self, v: f32) -> Result<()> {
        let mut buf = [0u8; 4];
        LittleEndian::write_f32(&mut buf, v);
        self.put_bytes(&buf)
    }

    /// Append a little-endian f64.
    pub fn put_f64(&mut self, v: f64) -> Result<()> {
        let mut buf = [0u8; 8];
        LittleEndian::write_f64(&mut buf, v);
        self.put_bytes(&buf)
    }

    /// Append a variable-length byte field: u64 length prefix, then bytes.
    pub fn put_var_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.put_u64(bytes.len() as u64)?;
        self.put_bytes(bytes)
    }

    /// Append a variable-length string field (length-prefixed UTF-8).
    pub fn put_str(&mut self, s: &str) -> Result<()> {
        self.put_var_bytes(s.as_bytes())
    }
}

/// Decode session over a byte source.
///
/// Tracks bytes consumed so the bundle reader can verify progress against
/// the descriptor.
pub struct RecordReader<'a> {
    source: &'a mut dyn ByteSource,
    consumed: u64,
}

impl<'a> RecordReader<'a> {
    pub(crate) fn new(source: &'a mut dyn ByteSource) -> Self {
        RecordReader {
            source,
            consumed: 0,
        }
    }

    /// Bytes consumed through this session so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Bytes left in the underlying source.
    pub fn remaining(&self) -> u64 {
        self.source.remaining()
    }

    /// Read exactly `n` raw bytes.
    pub fn take_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let bytes = self.source.read_exact(n)?;
        self.consumed += n as u64;
        Ok(bytes)
    }

    /// Read one byte.
    pub fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take_bytes(1)?[0])
    }

    /// Read a little-endian u16.
    pub fn take_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(&self.take_bytes(2)?))
    }

    /// Read a little-endian u32.
    pub fn take_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(&self.take_bytes(4)?))
    }

    /// Read a little-endian u64.
    pub fn take_u64(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(&self.take_bytes(8)?))
    }

    /// Read a little-endian f32.
    pub fn take_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(&self.take_bytes(4)?))
    }

    /// Read a little-endian f64.
    pub fn take_f64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(&self.take_bytes(8)?))
    }

    /// Read a variable-length byte field (u64 length prefix, then bytes).
    ///
    /// Fails with [`Error::LengthOverflow`] when the prefix exceeds the
    /// bytes left in the source.
    pub fn take_var_bytes(&mut self) -> Result<Vec<u8>> {
        let length = self.take_u64()?;
        let remaining = self.source.remaining();
        if length > remaining {
            return Err(Error::LengthOverflow { length, remaining });
        }
        self.take_bytes(length as usize)
    }

    /// Read a variable-length string field (length-prefixed UTF-8).
    pub fn take_str(&mut self) -> Result<String> {
        let bytes = self.take_var_bytes()?;
        String::from_utf8(bytes).map_err(|e| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8 in string field: {e}"),
            ))
        })
    }
}
