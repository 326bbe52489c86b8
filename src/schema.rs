//! # Record Schema
//!
//! A `RecordSchema` describes the named, typed fields of one record and where
//! each field's bytes live inside the record body. Offsets normally come from
//! the decoder that produced the store; `packed` computes them for schemas
//! built in memory.
//!
//! ## Field Model
//!
//! | Property | Meaning |
//! |----------|---------|
//! | name | unique within the schema |
//! | data type | element type (see [`DataType`]) |
//! | shape | dimensions of the field's own value; scalar fields use rank 0 |
//! | offset | byte position of the field inside each record |
//! | byte order | optional per-field override of the store's default order |
//! | nested schema | field layout of a Struct-typed field |
//!
//! A field's byte span is `element size x shape size`. Lookup by name goes
//! through a prebuilt map, so decode paths never scan the field list.

use std::sync::Arc;

use eyre::{bail, ensure, Result};
use hashbrown::{HashMap, HashSet};

use crate::buffer::ByteOrder;
use crate::index::Shape;
use crate::types::DataType;

#[derive(Debug, Clone)]
pub struct FieldDef {
    name: String,
    dtype: DataType,
    shape: Shape,
    offset: usize,
    byte_order: Option<ByteOrder>,
    nested: Option<Arc<RecordSchema>>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, dtype: DataType, shape: Shape) -> Self {
        Self {
            name: name.into(),
            dtype,
            shape,
            offset: 0,
            byte_order: None,
            nested: None,
        }
    }

    /// Scalar field shorthand.
    pub fn scalar(name: impl Into<String>, dtype: DataType) -> Self {
        Self::new(name, dtype, Shape::scalar())
    }

    pub fn at_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Per-field byte-order override; wins over the store default for this
    /// field only.
    pub fn with_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = Some(order);
        self
    }

    pub fn with_nested(mut self, nested: Arc<RecordSchema>) -> Self {
        self.nested = Some(nested);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.dtype
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn byte_order(&self) -> Option<ByteOrder> {
        self.byte_order
    }

    pub fn nested(&self) -> Option<&Arc<RecordSchema>> {
        self.nested.as_ref()
    }

    /// Byte width of one element of this field.
    pub fn elem_size(&self) -> Result<usize> {
        if let Some(size) = self.dtype.fixed_size() {
            return Ok(size);
        }
        match self.dtype {
            DataType::Struct => match &self.nested {
                Some(nested) => Ok(nested.record_size()),
                None => bail!("struct field {} has no nested schema", self.name),
            },
            _ => bail!("field {} has no fixed extent", self.name),
        }
    }

    /// Total byte span of the field inside one record.
    pub fn byte_len(&self) -> Result<usize> {
        Ok(self.elem_size()? * self.shape.size())
    }
}

#[derive(Debug)]
pub struct RecordSchema {
    fields: Vec<FieldDef>,
    by_name: HashMap<String, usize>,
    record_size: usize,
}

impl RecordSchema {
    /// Schema with decoder-supplied field offsets and a fixed record size.
    pub fn new(fields: Vec<FieldDef>, record_size: usize) -> Result<Self> {
        let by_name = Self::name_map(&fields)?;
        for field in &fields {
            let len = field.byte_len()?;
            ensure!(
                field.offset + len <= record_size,
                "field {} at offset {} ({} bytes) exceeds record size {}",
                field.name,
                field.offset,
                len,
                record_size
            );
        }
        Ok(Self {
            fields,
            by_name,
            record_size,
        })
    }

    /// Schema with sequentially packed offsets; the record size is the sum
    /// of the field spans.
    pub fn packed(mut fields: Vec<FieldDef>) -> Result<Self> {
        let mut offset = 0;
        for field in &mut fields {
            field.offset = offset;
            offset += field.byte_len()?;
        }
        let by_name = Self::name_map(&fields)?;
        Ok(Self {
            fields,
            by_name,
            record_size: offset,
        })
    }

    /// Schema for records that are not backed by a byte layout (factory
    /// output, proxies). Offsets and record size carry no meaning.
    pub fn adhoc(fields: Vec<FieldDef>) -> Result<Self> {
        let by_name = Self::name_map(&fields)?;
        Ok(Self {
            fields,
            by_name,
            record_size: 0,
        })
    }

    fn name_map(fields: &[FieldDef]) -> Result<HashMap<String, usize>> {
        let mut by_name = HashMap::with_capacity(fields.len());
        for (idx, field) in fields.iter().enumerate() {
            ensure!(
                by_name.insert(field.name.clone(), idx).is_none(),
                "duplicate field name {}",
                field.name
            );
        }
        Ok(by_name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field(&self, idx: usize) -> Option<&FieldDef> {
        self.fields.get(idx)
    }

    pub fn find(&self, name: &str) -> Option<&FieldDef> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn record_size(&self) -> usize {
        self.record_size
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Union of several schemas' fields, in input order; on a duplicate name
    /// the first owner wins.
    pub fn union(schemas: &[&RecordSchema]) -> Result<Self> {
        let mut fields = Vec::new();
        let mut seen = HashSet::new();
        for schema in schemas {
            for field in &schema.fields {
                if seen.insert(field.name.as_str()) {
                    fields.push(field.clone());
                }
            }
        }
        Self::adhoc(fields)
    }
}
