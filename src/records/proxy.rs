//! # ProxyRecord - Re-Viewing a Record through Another Member Set
//!
//! A proxy presents its own schema while forwarding every accessor to the
//! record it wraps, matched by field name. It is a thin adapter over a
//! delegate plus a member set, not a copy: re-typing or narrowing the visible
//! fields of an existing record costs nothing per field until a field is
//! actually read.
//!
//! A name must be present in the proxy's own member set to be readable
//! through it; resolution against the delegate happens per access, so the
//! proxy never assumes anything about the delegate's representation.

use std::sync::Arc;

use eyre::{ensure, Result};

use crate::records::Record;
use crate::schema::RecordSchema;
use crate::types::Value;

#[derive(Debug, Clone)]
pub struct ProxyRecord {
    schema: Arc<RecordSchema>,
    delegate: Box<Record>,
}

impl ProxyRecord {
    pub(crate) fn new(schema: Arc<RecordSchema>, delegate: Record) -> Self {
        Self {
            schema,
            delegate: Box::new(delegate),
        }
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn delegate(&self) -> &Record {
        &self.delegate
    }

    pub(crate) fn get(&self, name: &str) -> Result<Value<'_>> {
        // The proxy's member set gates visibility; the delegate's field of
        // the same name supplies the bytes.
        ensure!(self.schema.has(name), "no field named {}", name);
        self.delegate.get(name)
    }
}
