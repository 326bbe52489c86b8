//! # PositionedStore - Records at Explicit Buffer Positions
//!
//! Same buffer and field model as [`FixedStore`](crate::store::FixedStore),
//! but record `r`'s base offset is looked up in a caller-supplied position
//! table instead of being computed by multiplication. This is the store for
//! records that are not uniformly packed, such as records preceded by
//! variable-length headers.

use std::sync::Arc;

use eyre::{ensure, Result};

use crate::buffer::{ByteBuf, ByteOrder};
use crate::index::Shape;
use crate::records::{BufRecord, Record};
use crate::schema::RecordSchema;
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct PositionedStore {
    schema: Arc<RecordSchema>,
    shape: Shape,
    buf: ByteBuf,
    positions: Arc<[usize]>,
    order: ByteOrder,
    heap: Option<Arc<[String]>>,
}

impl PositionedStore {
    pub fn new(
        schema: Arc<RecordSchema>,
        buf: ByteBuf,
        positions: impl Into<Arc<[usize]>>,
        order: ByteOrder,
    ) -> Result<Self> {
        let positions = positions.into();
        let record_size = schema.record_size();
        for (recnum, &pos) in positions.iter().enumerate() {
            ensure!(
                pos + record_size <= buf.len(),
                "record {} at position {} exceeds buffer length {}",
                recnum,
                pos,
                buf.len()
            );
        }
        let shape = Shape::vector(positions.len());
        Ok(Self {
            schema,
            shape,
            buf,
            positions,
            order,
            heap: None,
        })
    }

    pub fn with_heap(mut self, heap: impl Into<Arc<[String]>>) -> Self {
        self.heap = Some(heap.into());
        self
    }

    pub fn into_store(self) -> RecordStore {
        RecordStore::Positioned(self)
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
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
            self.positions[recnum],
            self.order,
            self.heap.clone(),
        )))
    }
}
