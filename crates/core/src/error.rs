//! Error types for the entitybin core.
//!
//! Every failure the writer or reader can surface is a variant here; there is
//! no silent recovery inside the core. Reader failures carry the section
//! index and type tag as context.

use thiserror::Error;

/// All entitybin errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The sink accepted fewer bytes than requested.
    #[error("short write: sink accepted {written} of {requested} bytes")]
    ShortWrite {
        /// Bytes the caller asked to append.
        requested: u64,
        /// Bytes the sink actually accepted.
        written: u64,
    },

    /// The source produced fewer bytes than requested before EOF.
    #[error("short read: source ended after {got} of {wanted} bytes")]
    ShortRead {
        /// Bytes the caller asked for.
        wanted: u64,
        /// Bytes the source actually produced.
        got: u64,
    },

    /// The underlying sink or source reported a system error.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// A descriptor's name is absent from the reader's registry.
    #[error("section {section}: unknown type tag {tag:?}")]
    UnknownType {
        /// Index of the failing descriptor.
        section: usize,
        /// The unrecognized on-disk tag.
        tag: String,
    },

    /// A fixed-layout type's registered size disagrees with the descriptor.
    #[error(
        "section {section} ({tag}): descriptor size {stored} does not match \
         registered size {registered}"
    )]
    SchemaMismatch {
        /// Index of the failing descriptor.
        section: usize,
        /// Tag of the mismatched type.
        tag: String,
        /// Per-record size recorded in the descriptor.
        stored: u32,
        /// Per-record size of the registered implementation.
        registered: u32,
    },

    /// A variable-field length prefix exceeds the remaining payload bytes.
    #[error("length prefix {length} exceeds remaining {remaining} bytes")]
    LengthOverflow {
        /// The decoded length prefix.
        length: u64,
        /// Bytes left in the source.
        remaining: u64,
    },

    /// The declared section count implies more bytes than the source holds.
    #[error(
        "truncated artifact at section {section} ({tag}): need {needed} bytes, \
         have {available}"
    )]
    TruncatedArtifact {
        /// Index of the section that does not fit.
        section: usize,
        /// Tag of that section, or [`DESCRIPTOR_TABLE`] when the descriptor
        /// table itself is cut short.
        tag: String,
        /// Bytes the section requires.
        needed: u64,
        /// Bytes actually left in the source.
        available: u64,
    },

    /// A decode failure wrapped with the section it occurred in.
    #[error("section {section} ({tag}): {source}")]
    Section {
        /// Index of the section being decoded.
        section: usize,
        /// Tag of the section being decoded.
        tag: String,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
}

/// Placeholder tag used when the descriptor table itself is truncated and no
/// type tag has been decoded yet.
pub const DESCRIPTOR_TABLE: &str = "<descriptor table>";

/// Result type for entitybin operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap this error with section context, unless it already carries it.
    pub(crate) fn in_section(self, section: usize, tag: &str) -> Self {
        match self {
            Error::UnknownType { .. }
            | Error::SchemaMismatch { .. }
            | Error::TruncatedArtifact { .. }
            | Error::Section { .. } => self,
            other => Error::Section {
                section,
                tag: tag.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Check if this error (or the failure it wraps) is a truncation.
    pub fn is_truncated(&self) -> bool {
        match self {
            Error::TruncatedArtifact { .. } => true,
            Error::Section { source, .. } => source.is_truncated(),
            _ => false,
        }
    }

    /// Check if this error is an unknown-type failure.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, Error::UnknownType { .. })
    }

    /// Check if this error is a schema mismatch.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Error::SchemaMismatch { .. })
    }

    /// The section index attached to this error, if any.
    pub fn section(&self) -> Option<usize> {
        match self {
            Error::UnknownType { section, .. }
            | Error::SchemaMismatch { section, .. }
            | Error::TruncatedArtifact { section, .. }
            | Error::Section { section, .. } => Some(*section),
            _ => None,
        }
    }
}
