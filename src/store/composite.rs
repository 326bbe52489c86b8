//! # CompositeStore - Concatenation of Record Stores
//!
//! A composite chains several stores end-to-end into one logical record
//! sequence. Construction precomputes `starts[i]`, the global record number
//! where component `i` begins; decoding record `r` locates the owning
//! component as the greatest `i` with `starts[i] <= r` (binary search over
//! the ascending starts table) and delegates with the locally rebased
//! record number.
//!
//! Components must have a fixed extent and carry the same field names in
//! the same order; the composite answers with the first component's schema.

use std::sync::Arc;

use eyre::{bail, ensure, Result};

use crate::index::Shape;
use crate::records::Record;
use crate::schema::RecordSchema;
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct CompositeStore {
    schema: Arc<RecordSchema>,
    shape: Shape,
    parts: Vec<RecordStore>,
    starts: Arc<[usize]>,
    total: usize,
}

impl CompositeStore {
    pub fn new(parts: Vec<RecordStore>) -> Result<Self> {
        ensure!(!parts.is_empty(), "composite of no record stores");

        let schema = Arc::clone(parts[0].schema());
        let mut starts = Vec::with_capacity(parts.len());
        let mut total = 0;
        for part in &parts {
            let Some(len) = part.len() else {
                bail!("unsupported operation: composite over a streaming record store");
            };
            let names: Vec<&str> = part.schema().field_names().collect();
            let expect: Vec<&str> = schema.field_names().collect();
            ensure!(
                names == expect,
                "unsupported operation: composite of incompatible record schemas"
            );
            starts.push(total);
            total += len;
        }
        tracing::debug!(parts = parts.len(), total, "assembled composite store");

        Ok(Self {
            schema,
            shape: Shape::vector(total),
            parts,
            starts: starts.into(),
            total,
        })
    }

    pub fn into_store(self) -> RecordStore {
        RecordStore::Composite(self)
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn parts(&self) -> &[RecordStore] {
        &self.parts
    }

    /// Global record number where component `i` begins.
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    pub(crate) fn record(&self, recnum: usize) -> Result<Record> {
        ensure!(
            recnum < self.total,
            "record number {} out of range (count={})",
            recnum,
            self.total
        );
        // Owner = greatest i with starts[i] <= recnum. starts[0] is 0, so
        // partition_point is never 0 here.
        let idx = self.starts.partition_point(|&s| s <= recnum) - 1;
        self.parts[idx].record(recnum - self.starts[idx])
    }
}
