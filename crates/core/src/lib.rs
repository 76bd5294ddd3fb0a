//! Core implementation of the entitybin format.
//!
//! Everything lives in this one crate so the record encode/decode sessions
//! ([`RecordWriter`], [`RecordReader`]) can keep crate-private constructors:
//! only the bundle writer and reader open them, and record implementations
//! outside the crate interact with the format exclusively through those two
//! entry points.
//!
//! The artifact layout is `[section_count: u64][descriptor…][payload…]`,
//! little-endian, with one 40-byte descriptor per non-empty section. See the
//! `entitybin` facade crate for usage documentation.

#![warn(missing_docs)]

pub mod bundle;
pub mod descriptor;
pub mod error;
pub mod io;
pub mod record;
pub mod tag;

pub use bundle::{Bundle, BundleReader, BundleWriter, Registry};
pub use descriptor::{SectionDescriptor, DESCRIPTOR_SIZE};
pub use error::{Error, Result};
pub use io::{ByteSink, ByteSource, FileSink, FileSource, MemorySink, MemorySource};
pub use record::{FixedLayout, Record, RecordReader, RecordWriter};
pub use tag::{TypeTag, TAG_FIELD_LEN, TAG_MAX_LEN};
