//! Byte sinks and sources.
//!
//! A sink is an append-only write target; a source is a positional read
//! source. Both come in file-backed and in-memory flavors. Sinks and sources
//! are scoped resources: dropping a file-backed one releases its handle.

mod sink;
mod source;

pub use sink::{ByteSink, FileSink, MemorySink};
pub use source::{ByteSource, FileSource, MemorySource};
