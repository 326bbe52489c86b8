//! # MaterializedStore - Records Held in Memory
//!
//! A store over records that already exist as in-memory values rather than
//! encoded bytes: factory output, transformation results, or test fixtures.
//! Decode hands out a clone of the stored record, which is cheap because
//! records share their backing payloads by reference.

use std::sync::Arc;

use eyre::{ensure, Result};

use crate::index::Shape;
use crate::records::Record;
use crate::schema::RecordSchema;
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct MaterializedStore {
    schema: Arc<RecordSchema>,
    shape: Shape,
    records: Arc<[Record]>,
}

impl MaterializedStore {
    /// The caller supplies records matching `schema`; fields are resolved by
    /// name at access time, so a mismatched record surfaces as a missing
    /// field on read.
    pub fn new(schema: Arc<RecordSchema>, records: Vec<Record>) -> Self {
        let shape = Shape::vector(records.len());
        Self {
            schema,
            shape,
            records: records.into(),
        }
    }

    pub fn into_store(self) -> RecordStore {
        RecordStore::Materialized(self)
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn record(&self, recnum: usize) -> Result<Record> {
        ensure!(
            recnum < self.records.len(),
            "record number {} out of range (count={})",
            recnum,
            self.records.len()
        );
        Ok(self.records[recnum].clone())
    }
}
