//! # Record Stores - Indexed Collections of Structured Records
//!
//! A record store is an indexed collection of fixed-schema records with a
//! decode-by-offset strategy that differs per variant. `RecordStore` is a
//! closed enum so the section-table and composite-lookup logic can be
//! pattern-matched exhaustively and tested per variant.
//!
//! | Variant | Backing | Record `r` resolves to |
//! |---------|---------|------------------------|
//! | `Fixed` | one buffer, uniform record size | `base + r * record_size` |
//! | `Positioned` | one buffer, explicit offsets | `positions[r]` |
//! | `Section` | another store, subset of records | `inner.record(map[r])` |
//! | `Composite` | several stores, concatenated | owning component, rebased |
//! | `Materialized` | records already in memory | `records[r]` |
//! | `Streaming` | a record source, unbounded | unsupported |
//!
//! ## Lifecycle
//!
//! A decoder builds a store once per underlying buffer. A `RecordStore` is a
//! cheap-clone handle: its buffer, schema, tables, and stream state live
//! behind shared references, so sections and composites hold handles, never
//! copies of the payload. Iterators are created per traversal via
//! [`RecordStore::source`] and closed by the consumer when done.
//!
//! ## Sectioning
//!
//! [`RecordStore::section`] checks the selection against the extent first
//! (malformed selections fail before any decode), returns the original
//! handle when the selection covers the whole store, and otherwise builds
//! the index table by walking the selection's iterator once.

pub mod composite;
pub mod fixed;
pub mod materialized;
pub mod positioned;
pub mod section;
pub mod source;
pub mod streaming;

pub use composite::CompositeStore;
pub use fixed::FixedStore;
pub use materialized::MaterializedStore;
pub use positioned::PositionedStore;
pub use section::SectionStore;
pub use source::{LimitSource, MapSource, RecordSource, StoreSource};
pub use streaming::StreamingStore;

use std::sync::Arc;

use eyre::{bail, ensure, Result};

use crate::index::Shape;
use crate::range::Range;
use crate::records::Record;
use crate::schema::RecordSchema;

#[derive(Debug, Clone)]
pub enum RecordStore {
    Fixed(FixedStore),
    Positioned(PositionedStore),
    Section(SectionStore),
    Composite(CompositeStore),
    Materialized(MaterializedStore),
    Streaming(StreamingStore),
}

impl RecordStore {
    /// Record count, or `None` for a streaming store of indeterminate
    /// extent.
    pub fn len(&self) -> Option<usize> {
        match self {
            RecordStore::Fixed(s) => Some(s.len()),
            RecordStore::Positioned(s) => Some(s.len()),
            RecordStore::Section(s) => Some(s.len()),
            RecordStore::Composite(s) => Some(s.len()),
            RecordStore::Materialized(s) => Some(s.len()),
            RecordStore::Streaming(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    pub fn shape(&self) -> &Shape {
        match self {
            RecordStore::Fixed(s) => s.shape(),
            RecordStore::Positioned(s) => s.shape(),
            RecordStore::Section(s) => s.shape(),
            RecordStore::Composite(s) => s.shape(),
            RecordStore::Materialized(s) => s.shape(),
            RecordStore::Streaming(s) => s.shape(),
        }
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        match self {
            RecordStore::Fixed(s) => s.schema(),
            RecordStore::Positioned(s) => s.schema(),
            RecordStore::Section(s) => s.schema(),
            RecordStore::Composite(s) => s.schema(),
            RecordStore::Materialized(s) => s.schema(),
            RecordStore::Streaming(s) => s.schema(),
        }
    }

    /// Decode the record at `recnum`. Out-of-range numbers fail; a
    /// streaming store cannot decode by number at all.
    pub fn record(&self, recnum: usize) -> Result<Record> {
        match self {
            RecordStore::Fixed(s) => s.record(recnum),
            RecordStore::Positioned(s) => s.record(recnum),
            RecordStore::Section(s) => s.record(recnum),
            RecordStore::Composite(s) => s.record(recnum),
            RecordStore::Materialized(s) => s.record(recnum),
            RecordStore::Streaming(_) => {
                bail!("unsupported operation: random-access decode on a streaming record store")
            }
        }
    }

    /// Restrict this store to the records selected by `range`.
    ///
    /// A selection covering the whole extent returns this very store (a
    /// handle sharing all internals, not wrapped in a section); a strict
    /// subset walks the selection once into an index table. The selection is
    /// validated against the extent before anything is built.
    pub fn section(&self, range: &Range) -> Result<RecordStore> {
        let Some(len) = self.len() else {
            bail!("unsupported operation: section of a streaming record store");
        };
        if let Some(last) = range.last() {
            ensure!(
                last < len,
                "invalid selection: position {} exceeds record count {}",
                last,
                len
            );
        }
        if range.first() == 0 && range.stride() == 1 && range.len() == len {
            return Ok(self.clone());
        }
        let map: Arc<[usize]> = range.iter().collect::<Vec<_>>().into();
        tracing::debug!(selected = map.len(), of = len, "sectioned record store");
        Ok(RecordStore::Section(SectionStore::new(
            Box::new(self.clone()),
            map,
        )))
    }

    /// Iterator over all records in order. For a streaming store this
    /// resets and hands back the store's single iterator.
    pub fn source(&self) -> Result<Box<dyn RecordSource>> {
        match self {
            RecordStore::Streaming(s) => s.handle(),
            _ => {
                let len = self.len().expect("fixed-extent store");
                Ok(Box::new(StoreSource::new(self.clone(), 0, len)?))
            }
        }
    }
}
