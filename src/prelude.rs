//! Convenient imports for entitybin.
//!
//! Re-exports the types most callers need:
//!
//! ```ignore
//! use entitybin::prelude::*;
//! ```

pub use entitybin_core::{
    Bundle, BundleReader, BundleWriter, ByteSink, ByteSource, Error, FileSink, FileSource,
    FixedLayout, MemorySink, MemorySource, Record, RecordReader, RecordWriter, Registry, Result,
};
