//! # entitybin
//!
//! Serialize heterogeneous collections of in-memory records into a single
//! self-describing binary artifact, and reconstruct them later without any
//! out-of-band schema.
//!
//! ## Quick Start
//!
//! ```ignore
//! use entitybin::prelude::*;
//!
//! // Write several typed sequences into one artifact
//! BundleWriter::new()
//!     .section(&creatures)?
//!     .section(&waypoints)?
//!     .write_to_path("entities.bin")?;
//!
//! // Read them back through a registry keyed by type tag
//! let registry = Registry::new()
//!     .register::<Creature>()
//!     .register::<Waypoint>();
//! let mut bundle = BundleReader::read_path("entities.bin", &registry)?;
//! let creatures: Vec<Creature> = bundle.take().unwrap();
//! ```
//!
//! ## Record types
//!
//! A record participates through one of two paths, chosen at definition
//! time:
//!
//! - implement [`FixedLayout`] when every field is a fixed-width scalar —
//!   the serialized form is the 4-byte-aligned byte image;
//! - implement [`Record`] directly when a field has variable length —
//!   fixed-width fields first, then each variable field as a u64 length
//!   prefix plus bytes.
//!
//! Encoding and decoding only ever run inside the writer's and reader's
//! sessions; records cannot be serialized ad hoc.
//!
//! ## Artifact layout
//!
//! Little-endian throughout:
//!
//! ```text
//! offset 0       section_count   u64
//! offset 8       descriptor[i]   40 bytes each: count u32, size u32, name [u8; 32]
//! offset 8+40N   payload[i]      descriptor[i].count records, collection order
//! ```

#![warn(missing_docs)]

pub mod prelude;

pub use entitybin_core::{
    Bundle, BundleReader, BundleWriter, ByteSink, ByteSource, Error, FileSink, FileSource,
    FixedLayout, MemorySink, MemorySource, Record, RecordReader, RecordWriter, Registry, Result,
    SectionDescriptor, TypeTag, DESCRIPTOR_SIZE, TAG_FIELD_LEN, TAG_MAX_LEN,
};
