//! Bundles: ordered sets of typed record sequences.
//!
//! The writer turns a bundle into one artifact; the reader turns an artifact
//! back into a bundle, dispatching through a [`Registry`](registry::Registry)
//! keyed by type tag.

mod reader;
mod registry;
mod writer;

pub use reader::BundleReader;
pub use registry::Registry;
pub use writer::BundleWriter;

use std::any::Any;

use crate::record::Record;
use crate::tag::TypeTag;

/// The in-memory counterpart of an artifact: typed sequences keyed by their
/// canonical (possibly truncated) type tag, in artifact order.
///
/// Sequences are stored type-erased; [`take`](Bundle::take) and
/// [`get`](Bundle::get) recover them by record type.
#[derive(Default)]
pub struct Bundle {
    sections: Vec<(String, Box<dyn Any>)>,
}

impl std::fmt::Debug for Bundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bundle")
            .field(
                "sections",
                &self.sections.iter().map(|(tag, _)| tag).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Bundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the bundle holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Canonical tags in artifact order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(tag, _)| tag.as_str())
    }

    /// Whether a section with this tag is present.
    pub fn contains(&self, tag: &str) -> bool {
        self.sections.iter().any(|(t, _)| t == tag)
    }

    /// Borrow the sequence for record type `T`, if present.
    pub fn get<T: Record>(&self) -> Option<&Vec<T>> {
        let tag = TypeTag::new(T::TAG).name();
        self.sections
            .iter()
            .find(|(t, _)| *t == tag)
            .and_then(|(_, boxed)| boxed.downcast_ref::<Vec<T>>())
    }

    /// Remove and return the sequence for record type `T`, if present.
    pub fn take<T: Record>(&mut self) -> Option<Vec<T>> {
        let tag = TypeTag::new(T::TAG).name();
        let idx = self.sections.iter().position(|(t, _)| *t == tag)?;
        let (_, boxed) = self.sections.remove(idx);
        boxed.downcast::<Vec<T>>().ok().map(|v| *v)
    }

    pub(crate) fn insert(&mut self, tag: String, records: Box<dyn Any>) {
        self.sections.push((tag, records));
    }
}
