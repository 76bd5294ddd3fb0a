//! On-disk type tags.
//!
//! A tag is the 32-byte, null-terminated name field of a section descriptor.
//! At most 30 bytes of the source string survive; the truncated form is the
//! canonical on-disk tag for that type.

use std::fmt;

/// Width of the name field in a section descriptor.
pub const TAG_FIELD_LEN: usize = 32;

/// Longest tag that survives truncation.
pub const TAG_MAX_LEN: usize = 30;

/// A fixed-width, null-terminated type tag.
///
/// Built from a record type's declared tag string, truncated at
/// [`TAG_MAX_LEN`] bytes with a trailing null at `min(len, 30)`; positions
/// beyond the null are zeroed. Truncation is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag([u8; TAG_FIELD_LEN]);

impl TypeTag {
    /// Build a tag from a name string, truncating at [`TAG_MAX_LEN`] bytes.
    pub fn new(name: &str) -> Self {
        let bytes = name.as_bytes();
        let len = bytes.len().min(TAG_MAX_LEN);
        let mut field = [0u8; TAG_FIELD_LEN];
        field[..len].copy_from_slice(&bytes[..len]);
        // field[len] is already the required null terminator
        TypeTag(field)
    }

    /// Wrap a raw 32-byte name field read from a descriptor.
    pub fn from_raw(field: [u8; TAG_FIELD_LEN]) -> Self {
        TypeTag(field)
    }

    /// The raw 32-byte field as written to disk.
    pub fn as_raw(&self) -> &[u8; TAG_FIELD_LEN] {
        &self.0
    }

    /// The tag text up to the first null byte.
    ///
    /// Tags are ASCII by convention; non-UTF-8 bytes are replaced for
    /// diagnostics rather than rejected.
    pub fn name(&self) -> String {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(TAG_FIELD_LEN);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
