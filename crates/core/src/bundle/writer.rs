//! The bundle writer.
//!
//! Collects any number of typed sequences, then assembles one artifact:
//! `[section_count: u64][descriptor…][payload…]`, descriptors and payloads
//! in the same collection order. Each call to [`section`](BundleWriter::section)
//! captures one element type, so heterogeneous bundles build up one typed
//! sequence at a time.

use std::path::Path;

use tracing::debug;

use crate::descriptor::SectionDescriptor;
use crate::error::Result;
use crate::io::{ByteSink, FileSink, MemorySink};
use crate::record::{Record, RecordWriter};
use crate::tag::TypeTag;

struct PendingSection {
    descriptor: SectionDescriptor,
    payload: Vec<u8>,
}

/// Builder that turns typed sequences into a single binary artifact.
#[derive(Default)]
pub struct BundleWriter {
    sections: Vec<PendingSection>,
}

impl BundleWriter {
    /// Create a writer with no sections collected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-empty sections collected so far.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Collect one typed sequence.
    ///
    /// Empty sequences are silently skipped and produce no descriptor.
    /// Every element is encoded into a per-section scratch buffer now; the
    /// first encode failure aborts the whole bundle.
    pub fn section<T: Record>(mut self, records: &[T]) -> Result<Self> {
        if records.is_empty() {
            debug!(tag = T::TAG, "skipping empty sequence");
            return Ok(self);
        }

        let mut scratch = MemorySink::new();
        let mut session = RecordWriter::new(&mut scratch);
        for record in records {
            record.encode_to(&mut session)?;
        }
        let payload = scratch.into_bytes();

        let descriptor = SectionDescriptor::new(
            records.len() as u32,
            T::NOMINAL_SIZE,
            TypeTag::new(T::TAG),
        );
        debug!(
            tag = %descriptor.name,
            count = descriptor.count,
            bytes = payload.len(),
            "collected section"
        );

        self.sections.push(PendingSection {
            descriptor,
            payload,
        });
        Ok(self)
    }

    /// Assemble the artifact into `sink`. Returns total bytes written.
    ///
    /// A sink failure aborts the artifact; partial output may remain in the
    /// sink (there is no atomic rename).
    pub fn write_to(self, sink: &mut dyn ByteSink) -> Result<u64> {
        let mut session = RecordWriter::new(sink);

        session.put_u64(self.sections.len() as u64)?;
        for section in &self.sections {
            section.descriptor.encode_to(&mut session)?;
        }
        for section in &self.sections {
            session.put_bytes(&section.payload)?;
        }

        let total = session.written();
        debug!(
            sections = self.sections.len(),
            bytes = total,
            "artifact assembled"
        );
        Ok(total)
    }

    /// Assemble the artifact into a new file at `path`.
    ///
    /// Convenience over [`write_to`](BundleWriter::write_to) with a
    /// [`FileSink`]; the file is flushed and synced before returning.
    pub fn write_to_path(self, path: impl AsRef<Path>) -> Result<u64> {
        let mut sink = FileSink::create(path)?;
        let written = self.write_to(&mut sink)?;
        sink.close()?;
        Ok(written)
    }
}
