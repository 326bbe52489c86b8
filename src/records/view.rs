//! # Record - One Decoded Structure Instance
//!
//! `Record` is the closed set of record representations:
//!
//! | Variant | Backing | Produced by |
//! |---------|---------|-------------|
//! | `Buf`    | schema + shared byte buffer + base offset | byte-backed stores |
//! | `Owned`  | materialized values | factory, transformations |
//! | `Proxy`  | another record, re-viewed through a different member set | [`Record::proxy`] |
//! | `Merged` | several records, union of their fields | [`merge`](crate::records::merge) |
//!
//! Every accessor resolves the field by name and materializes its value
//! lazily; nothing is decoded until asked for. Buffer-backed reads borrow
//! from the shared payload where the encoding permits (char arrays, heap
//! strings, raw bytes) and materialize only where byte order may change the
//! representation.
//!
//! ## Field Byte Order
//!
//! A buffer-backed record carries its store's default byte order; a field
//! with an order override decodes under the override. The order is passed
//! into each read, so interleaved accesses to differently-ordered fields of
//! one record never disturb each other.

use std::borrow::Cow;
use std::sync::Arc;

use eyre::{bail, ensure, eyre, Result};

use crate::buffer::{ByteBuf, ByteOrder};
use crate::records::factory::MergedRecord;
use crate::records::proxy::ProxyRecord;
use crate::schema::{FieldDef, RecordSchema};
use crate::types::{DataType, Value};

#[derive(Debug, Clone)]
pub enum Record {
    Buf(BufRecord),
    Owned(OwnedRecord),
    Proxy(ProxyRecord),
    Merged(MergedRecord),
}

impl Record {
    /// Re-view `record` through `schema`: every accessor forwards to the
    /// original record by field name. No data is copied.
    pub fn proxy(record: Record, schema: Arc<RecordSchema>) -> Record {
        Record::Proxy(ProxyRecord::new(schema, record))
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        match self {
            Record::Buf(r) => &r.schema,
            Record::Owned(r) => &r.schema,
            Record::Proxy(r) => r.schema(),
            Record::Merged(r) => r.schema(),
        }
    }

    /// Decode one field by name.
    pub fn get(&self, name: &str) -> Result<Value<'_>> {
        match self {
            Record::Buf(r) => r.get(name),
            Record::Owned(r) => Ok(r.value(name)?.clone()),
            Record::Proxy(r) => r.get(name),
            Record::Merged(r) => r.get(name),
        }
    }

    pub fn get_i8(&self, name: &str) -> Result<i8> {
        self.get(name)?.to_i8()
    }

    pub fn get_u8(&self, name: &str) -> Result<u8> {
        self.get(name)?.to_u8()
    }

    pub fn get_i16(&self, name: &str) -> Result<i16> {
        self.get(name)?.to_i16()
    }

    pub fn get_u16(&self, name: &str) -> Result<u16> {
        self.get(name)?.to_u16()
    }

    pub fn get_i32(&self, name: &str) -> Result<i32> {
        self.get(name)?.to_i32()
    }

    pub fn get_u32(&self, name: &str) -> Result<u32> {
        self.get(name)?.to_u32()
    }

    pub fn get_i64(&self, name: &str) -> Result<i64> {
        self.get(name)?.to_i64()
    }

    pub fn get_u64(&self, name: &str) -> Result<u64> {
        self.get(name)?.to_u64()
    }

    pub fn get_f32(&self, name: &str) -> Result<f32> {
        self.get(name)?.to_f32()
    }

    pub fn get_f64(&self, name: &str) -> Result<f64> {
        self.get(name)?.to_f64()
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        self.get(name)?.as_bool()
    }

    pub fn get_char(&self, name: &str) -> Result<char> {
        self.get(name)?.as_char()
    }

    /// String view of a Text or scalar Char field.
    pub fn get_string(&self, name: &str) -> Result<String> {
        match self.get(name)? {
            Value::Text(s) => Ok(s.into_owned()),
            Value::Char(c) => Ok(c.to_string()),
            other => bail!("forbidden conversion: {} -> string", other.kind_name()),
        }
    }

    /// Nested record of a Struct-typed field.
    pub fn get_record(&self, name: &str) -> Result<Record> {
        match self.get(name)? {
            Value::Struct(r) => Ok(*r),
            other => bail!("field {} is not a struct (found {})", name, other),
        }
    }

    /// Nested record sequence of a Sequence-typed field.
    pub fn get_sequence(&self, name: &str) -> Result<Vec<Record>> {
        match self.get(name)? {
            Value::Sequence(rs) => Ok(rs),
            other => bail!("field {} is not a sequence (found {})", name, other),
        }
    }

    pub fn get_i32s(&self, name: &str) -> Result<Vec<i32>> {
        self.get(name)?.to_i32s()
    }

    pub fn get_i64s(&self, name: &str) -> Result<Vec<i64>> {
        self.get(name)?.to_i64s()
    }

    pub fn get_f32s(&self, name: &str) -> Result<Vec<f32>> {
        self.get(name)?.to_f32s()
    }

    pub fn get_f64s(&self, name: &str) -> Result<Vec<f64>> {
        self.get(name)?.to_f64s()
    }
}

/// Zero-copy record view over a shared byte buffer.
#[derive(Debug, Clone)]
pub struct BufRecord {
    schema: Arc<RecordSchema>,
    buf: ByteBuf,
    base: usize,
    order: ByteOrder,
    heap: Option<Arc<[String]>>,
}

impl BufRecord {
    pub(crate) fn new(
        schema: Arc<RecordSchema>,
        buf: ByteBuf,
        base: usize,
        order: ByteOrder,
        heap: Option<Arc<[String]>>,
    ) -> Self {
        Self {
            schema,
            buf,
            base,
            order,
            heap,
        }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn buffer(&self) -> &ByteBuf {
        &self.buf
    }

    fn get(&self, name: &str) -> Result<Value<'_>> {
        let field = self
            .schema
            .find(name)
            .ok_or_else(|| eyre!("no field named {}", name))?;
        self.decode_field(field)
    }

    fn decode_field(&self, field: &FieldDef) -> Result<Value<'_>> {
        let order = field.byte_order().unwrap_or(self.order);
        let pos = self.base + field.offset();
        let n = field.shape().size();
        let scalar = n == 1;

        Ok(match field.data_type() {
            DataType::Int8 => {
                if scalar {
                    Value::Int8(self.buf.get_i8(pos)?)
                } else {
                    Value::Int8s(self.buf.get_i8s(pos, n)?)
                }
            }
            DataType::UInt8 => {
                if scalar {
                    Value::UInt8(self.buf.get_u8(pos)?)
                } else {
                    Value::Bytes(Cow::Borrowed(self.buf.get_bytes(pos, n)?))
                }
            }
            DataType::Int16 => {
                if scalar {
                    Value::Int16(self.buf.get_i16(pos, order)?)
                } else {
                    Value::Int16s(self.buf.get_i16s(pos, n, order)?)
                }
            }
            DataType::UInt16 => {
                if scalar {
                    Value::UInt16(self.buf.get_u16(pos, order)?)
                } else {
                    Value::UInt16s(self.buf.get_u16s(pos, n, order)?)
                }
            }
            DataType::Int32 => {
                if scalar {
                    Value::Int32(self.buf.get_i32(pos, order)?)
                } else {
                    Value::Int32s(self.buf.get_i32s(pos, n, order)?)
                }
            }
            DataType::UInt32 => {
                if scalar {
                    Value::UInt32(self.buf.get_u32(pos, order)?)
                } else {
                    Value::UInt32s(self.buf.get_u32s(pos, n, order)?)
                }
            }
            DataType::Int64 => {
                if scalar {
                    Value::Int64(self.buf.get_i64(pos, order)?)
                } else {
                    Value::Int64s(self.buf.get_i64s(pos, n, order)?)
                }
            }
            DataType::UInt64 => {
                if scalar {
                    Value::UInt64(self.buf.get_u64(pos, order)?)
                } else {
                    Value::UInt64s(self.buf.get_u64s(pos, n, order)?)
                }
            }
            DataType::Float32 => {
                if scalar {
                    Value::Float32(self.buf.get_f32(pos, order)?)
                } else {
                    Value::Float32s(self.buf.get_f32s(pos, n, order)?)
                }
            }
            DataType::Float64 => {
                if scalar {
                    Value::Float64(self.buf.get_f64(pos, order)?)
                } else {
                    Value::Float64s(self.buf.get_f64s(pos, n, order)?)
                }
            }
            DataType::Char => {
                let bytes = self.buf.get_bytes(pos, n)?;
                if scalar {
                    Value::Char(char::from(bytes[0]))
                } else {
                    let text = std::str::from_utf8(bytes)
                        .map_err(|_| eyre!("char field {} is not valid UTF-8", field.name()))?;
                    Value::Text(Cow::Borrowed(text.trim_end_matches('\0')))
                }
            }
            DataType::Bool => {
                ensure!(
                    scalar,
                    "unsupported operation: bool field {} with non-scalar shape",
                    field.name()
                );
                Value::Bool(self.buf.get_u8(pos)? != 0)
            }
            DataType::String => {
                ensure!(
                    scalar,
                    "unsupported operation: string-array field {}",
                    field.name()
                );
                let slot = self.buf.get_u32(pos, order)? as usize;
                let heap = self
                    .heap
                    .as_ref()
                    .ok_or_else(|| eyre!("string field {} but store has no heap", field.name()))?;
                ensure!(
                    slot < heap.len(),
                    "heap slot {} out of range (heap len {})",
                    slot,
                    heap.len()
                );
                Value::Text(Cow::Borrowed(heap[slot].as_str()))
            }
            DataType::Struct => {
                ensure!(
                    scalar,
                    "unsupported operation: struct-array field {}",
                    field.name()
                );
                let nested = field
                    .nested()
                    .ok_or_else(|| eyre!("struct field {} has no nested schema", field.name()))?;
                Value::Struct(Box::new(Record::Buf(BufRecord::new(
                    Arc::clone(nested),
                    self.buf.clone(),
                    pos,
                    self.order,
                    self.heap.clone(),
                ))))
            }
            DataType::Sequence => bail!(
                "unsupported operation: sequence field {} cannot be decoded from a flat record buffer",
                field.name()
            ),
        })
    }
}

/// Record holding already-materialized values, one per schema field.
#[derive(Debug, Clone)]
pub struct OwnedRecord {
    schema: Arc<RecordSchema>,
    values: Vec<Value<'static>>,
}

impl OwnedRecord {
    pub fn new(schema: Arc<RecordSchema>, values: Vec<Value<'static>>) -> Result<Self> {
        ensure!(
            values.len() == schema.field_count(),
            "value count {} does not match schema field count {}",
            values.len(),
            schema.field_count()
        );
        Ok(Self { schema, values })
    }

    pub fn value(&self, name: &str) -> Result<&Value<'static>> {
        let idx = self
            .schema
            .index_of(name)
            .ok_or_else(|| eyre!("no field named {}", name))?;
        Ok(&self.values[idx])
    }
}
