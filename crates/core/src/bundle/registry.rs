//! The reader-side type registry.
//!
//! Maps a canonical on-disk tag to a factory that allocates the right
//! sequence type and decodes records into it. Registration captures the
//! record type once; lookups at read time are by tag string.

use std::any::Any;
use std::collections::HashMap;

use crate::error::Result;
use crate::record::{Record, RecordReader};
use crate::tag::TypeTag;

type SectionDecoder = Box<dyn Fn(&mut RecordReader<'_>, u32) -> Result<Box<dyn Any>>>;

pub(crate) struct RegistryEntry {
    /// The registered in-memory size for fixed-layout types; `None` for
    /// custom-layout types, whose descriptor size is advisory.
    pub(crate) fixed_size: Option<u32>,
    pub(crate) decode: SectionDecoder,
}

/// Mapping from type tag to decode factory.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<String, RegistryEntry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register record type `T` under its canonical (truncated) tag.
    ///
    /// Registering a second type under the same tag replaces the first;
    /// within one artifact a tag names exactly one implementation.
    pub fn register<T: Record>(mut self) -> Self {
        let tag = TypeTag::new(T::TAG).name();
        let fixed_size = T::FIXED_LAYOUT.then_some(T::NOMINAL_SIZE);
        let decode: SectionDecoder = Box::new(|reader, count| {
            // cap the pre-allocation; a hostile count is caught by decode
            // failures, not by reserving gigabytes up front
            let mut records = Vec::with_capacity(count.min(1024) as usize);
            for _ in 0..count {
                records.push(T::decode_from(reader)?);
            }
            Ok(Box::new(records) as Box<dyn Any>)
        });
        self.entries.insert(tag, RegistryEntry { fixed_size, decode });
        self
    }

    /// Whether a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn lookup(&self, tag: &str) -> Option<&RegistryEntry> {
        self.entries.get(tag)
    }
}
