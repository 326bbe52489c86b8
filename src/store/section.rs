//! # SectionStore - A Record-Number Subset of Another Store
//!
//! A section is a zero-copy view restricting another store to a subset of
//! its record numbers. The selection's iterator is walked once at
//! construction, recording each selected original record number into a
//! table indexed by new sequential position; every later decode indexes
//! through that table and delegates to the original store.
//!
//! Sections are built through
//! [`RecordStore::section`](crate::store::RecordStore::section), which
//! returns the original store handle untouched when the selection covers
//! the whole extent.

use std::sync::Arc;

use eyre::{ensure, Result};

use crate::index::Shape;
use crate::records::Record;
use crate::schema::RecordSchema;
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct SectionStore {
    inner: Box<RecordStore>,
    map: Arc<[usize]>,
    shape: Shape,
}

impl SectionStore {
    pub(crate) fn new(inner: Box<RecordStore>, map: Arc<[usize]>) -> Self {
        let shape = Shape::vector(map.len());
        Self { inner, map, shape }
    }

    pub fn inner(&self) -> &RecordStore {
        &self.inner
    }

    /// New record index -> original record number, in selection order.
    pub fn map(&self) -> &[usize] {
        &self.map
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        self.inner.schema()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn record(&self, recnum: usize) -> Result<Record> {
        ensure!(
            recnum < self.map.len(),
            "record number {} out of range (count={})",
            recnum,
            self.map.len()
        );
        self.inner.record(self.map[recnum])
    }
}
