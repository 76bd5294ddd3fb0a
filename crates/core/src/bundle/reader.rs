//! The bundle reader.
//!
//! Parses an artifact back into typed sequences, dispatching into the
//! registry by type tag. The first failure is surfaced with section index
//! and tag as context; no partial bundle is ever returned.

use std::path::Path;

use tracing::debug;

use crate::descriptor::{SectionDescriptor, DESCRIPTOR_SIZE};
use crate::error::{Error, Result, DESCRIPTOR_TABLE};
use crate::io::{ByteSource, FileSource};
use crate::record::{Record, RecordReader};

use super::registry::Registry;
use super::Bundle;

/// Reader for bundle artifacts.
pub struct BundleReader;

impl BundleReader {
    /// Parse an artifact from `source` using `registry` for dispatch.
    ///
    /// Fails with [`Error::UnknownType`] on an unregistered tag — the
    /// safer choice over best-effort skipping, which is only sound for
    /// wholly fixed-layout sections.
    pub fn read(source: &mut dyn ByteSource, registry: &Registry) -> Result<Bundle> {
        let mut session = RecordReader::new(source);

        let section_count = session.take_u64()?;
        let descriptors = Self::read_descriptors(&mut session, section_count)?;
        debug!(sections = section_count, "descriptor table read");

        // Fixed-layout sections declare their exact payload length, so the
        // whole artifact can be checked against the source before any
        // record of a failing section is decoded.
        let mut bundle = Bundle::new();
        for (index, descriptor) in descriptors.iter().enumerate() {
            let tag = descriptor.name.name();
            let entry = registry.lookup(&tag).ok_or_else(|| Error::UnknownType {
                section: index,
                tag: tag.clone(),
            })?;

            if let Some(registered) = entry.fixed_size {
                if registered != descriptor.size {
                    return Err(Error::SchemaMismatch {
                        section: index,
                        tag,
                        stored: descriptor.size,
                        registered,
                    });
                }
                let needed = descriptor.fixed_payload_len();
                if needed > session.remaining() {
                    return Err(Error::TruncatedArtifact {
                        section: index,
                        tag,
                        needed,
                        available: session.remaining(),
                    });
                }
            }

            let before = session.consumed();
            let records = (entry.decode)(&mut session, descriptor.count)
                .map_err(|e| e.in_section(index, &tag))?;
            debug!(
                section = index,
                tag = %tag,
                count = descriptor.count,
                bytes = session.consumed() - before,
                "section decoded"
            );
            bundle.insert(tag, records);
        }

        Ok(bundle)
    }

    /// Parse the artifact file at `path`.
    pub fn read_path(path: impl AsRef<Path>, registry: &Registry) -> Result<Bundle> {
        let mut source = FileSource::open(path)?;
        Self::read(&mut source, registry)
    }

    fn read_descriptors(
        session: &mut RecordReader<'_>,
        section_count: u64,
    ) -> Result<Vec<SectionDescriptor>> {
        let needed = section_count.saturating_mul(DESCRIPTOR_SIZE as u64);
        if needed > session.remaining() {
            return Err(Error::TruncatedArtifact {
                section: (session.remaining() / DESCRIPTOR_SIZE as u64) as usize,
                tag: DESCRIPTOR_TABLE.to_string(),
                needed,
                available: session.remaining(),
            });
        }

        let mut descriptors = Vec::with_capacity(section_count as usize);
        for _ in 0..section_count {
            descriptors.push(SectionDescriptor::decode_from(session)?);
        }
        Ok(descriptors)
    }
}
