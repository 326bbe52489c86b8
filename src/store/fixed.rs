//! # FixedStore - Uniformly Packed Records over One Buffer
//!
//! All records share one contiguous buffer and one fixed record byte size;
//! the field `m` of record `r` lives at `base + r * record_size + m.offset`.
//! The store carries a default byte order; a field-level override switches
//! the order for that field only, so records may mix endianness per field.
//!
//! An optional string heap backs String-typed fields: the record body holds
//! a 4-byte slot index, the heap holds the characters.

use std::sync::Arc;

use eyre::{ensure, Result};

use crate::buffer::{ByteBuf, ByteOrder};
use crate::index::Shape;
use crate::records::{BufRecord, Record};
use crate::schema::RecordSchema;
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct FixedStore {
    schema: Arc<RecordSchema>,
    shape: Shape,
    buf: ByteBuf,
    base: usize,
    order: ByteOrder,
    heap: Option<Arc<[String]>>,
}

impl FixedStore {
    pub fn new(
        schema: Arc<RecordSchema>,
        shape: Shape,
        buf: ByteBuf,
        order: ByteOrder,
    ) -> Result<Self> {
        let store = Self {
            schema,
            shape,
            buf,
            base: 0,
            order,
            heap: None,
        };
        store.check_extent()?;
        Ok(store)
    }

    /// Records start at `base` instead of the beginning of the buffer, for
    /// buffers with a leading header.
    pub fn at_base(mut self, base: usize) -> Result<Self> {
        self.base = base;
        self.check_extent()?;
        Ok(self)
    }

    /// Attach the string heap backing String-typed fields.
    pub fn with_heap(mut self, heap: impl Into<Arc<[String]>>) -> Self {
        self.heap = Some(heap.into());
        self
    }

    fn check_extent(&self) -> Result<()> {
        let need = self.base + self.shape.size() * self.schema.record_size();
        ensure!(
            need <= self.buf.len(),
            "{} records of {} bytes at base {} exceed buffer length {}",
            self.shape.size(),
            self.schema.record_size(),
            self.base,
            self.buf.len()
        );
        Ok(())
    }

    pub fn into_store(self) -> RecordStore {
        RecordStore::Fixed(self)
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.shape.size()
    }

    pub fn buffer(&self) -> &ByteBuf {
        &self.buf
    }

    pub fn record_size(&self) -> usize {
        self.schema.record_size()
    }

    pub(crate) fn record(&self, recnum: usize) -> Result<Record> {
        ensure!(
            recnum < self.len(),
            "record number {} out of range (count={})",
            recnum,
            self.len()
        );
        Ok(Record::Buf(BufRecord::new(
            Arc::clone(&self.schema),
            self.buf.clone(),
            self.base + recnum * self.schema.record_size(),
            self.order,
            self.heap.clone(),
        )))
    }
}
