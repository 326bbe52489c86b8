//! # Record Factory
//!
//! Ad hoc constructors for records that do not come from a byte buffer:
//! single-field records wrapping one scalar value, and merges of several
//! candidate records into one logical record.
//!
//! ## Merge Rule
//!
//! The merge input is an ordered list with holes (`None` marks an absent
//! record). Exactly one present record is returned as-is, unchanged; several
//! produce a `Merged` record exposing the union of all contributing fields,
//! where each lookup resolves to the first record in input order that has the
//! field. Field names are expected to be disjoint across contributors, so
//! first-match-wins is a tie-break, not a feature to lean on.

use std::sync::Arc;

use eyre::{bail, eyre, Result};

use crate::index::Shape;
use crate::records::view::OwnedRecord;
use crate::records::Record;
use crate::schema::{FieldDef, RecordSchema};
use crate::types::Value;

/// Single-field record from one value; the field's type and shape are
/// inferred from the value's runtime kind.
pub fn record_of(name: impl Into<String>, value: Value<'static>) -> Result<Record> {
    let name = name.into();
    let shape = match value.array_len() {
        Some(len) => Shape::vector(len),
        None => Shape::scalar(),
    };
    let field = FieldDef::new(name, value.data_type(), shape);
    let schema = Arc::new(RecordSchema::adhoc(vec![field])?);
    Ok(Record::Owned(OwnedRecord::new(schema, vec![value])?))
}

/// Merge an ordered list of candidate records, skipping holes.
pub fn merge(parts: Vec<Option<Record>>) -> Result<Record> {
    let mut present: Vec<Record> = parts.into_iter().flatten().collect();
    match present.len() {
        0 => bail!("merge of no records"),
        1 => Ok(present.pop().expect("one present record")),
        _ => {
            let schemas: Vec<&RecordSchema> =
                present.iter().map(|r| r.schema().as_ref()).collect();
            let schema = Arc::new(RecordSchema::union(&schemas)?);
            tracing::trace!(parts = present.len(), fields = schema.field_count(), "merged records");
            Ok(Record::Merged(MergedRecord {
                schema,
                parts: present,
            }))
        }
    }
}

/// Aggregate of several records; lookups resolve to the first contributor
/// that carries the field.
#[derive(Debug, Clone)]
pub struct MergedRecord {
    pub(crate) schema: Arc<RecordSchema>,
    pub(crate) parts: Vec<Record>,
}

impl MergedRecord {
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn parts(&self) -> &[Record] {
        &self.parts
    }

    pub(crate) fn get(&self, name: &str) -> Result<Value<'_>> {
        for part in &self.parts {
            if part.schema().has(name) {
                return part.get(name);
            }
        }
        Err(eyre!("no field named {}", name))
    }
}
