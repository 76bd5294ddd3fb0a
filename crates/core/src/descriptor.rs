//! Section descriptors.
//!
//! One descriptor per non-empty section, exactly 40 bytes on disk:
//! `count: u32`, `size: u32`, then the 32-byte null-terminated type tag.
//! The descriptor is itself a fixed-layout record and travels through the
//! same serialization path as the sections it describes.

use byteorder::{ByteOrder, LittleEndian};

use crate::record::FixedLayout;
use crate::tag::{TypeTag, TAG_FIELD_LEN};

/// On-disk size of one descriptor.
pub const DESCRIPTOR_SIZE: usize = 40;

/// Fixed-width metadata describing one type's section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDescriptor {
    /// Number of records in the section.
    pub count: u32,
    /// Nominal per-record size. Authoritative for fixed-layout types,
    /// advisory otherwise; never determines a variable section's length.
    pub size: u32,
    /// Type tag naming the implementation that parses the section.
    pub name: TypeTag,
}

impl SectionDescriptor {
    /// Build a descriptor for `count` records of the tagged type.
    pub fn new(count: u32, size: u32, name: TypeTag) -> Self {
        SectionDescriptor { count, size, name }
    }

    /// Payload bytes this descriptor implies for a fixed-layout section.
    pub fn fixed_payload_len(&self) -> u64 {
        u64::from(self.count) * u64::from(self.size)
    }
}

impl FixedLayout for SectionDescriptor {
    const TAG: &'static str = "SectionDescriptor";
    const SIZE: usize = DESCRIPTOR_SIZE;

    fn store(&self, buf: &mut [u8]) {
        LittleEndian::write_u32(&mut buf[0..4], self.count);
        LittleEndian::write_u32(&mut buf[4..8], self.size);
        buf[8..8 + TAG_FIELD_LEN].copy_from_slice(self.name.as_raw());
    }

    fn load(buf: &[u8]) -> Self {
        let mut raw = [0u8; TAG_FIELD_LEN];
        raw.copy_from_slice(&buf[8..8 + TAG_FIELD_LEN]);
        SectionDescriptor {
            count: LittleEndian::read_u32(&buf[0..4]),
            size: LittleEndian::read_u32(&buf[4..8]),
            name: TypeTag::from_raw(raw),
        }
    }
}
