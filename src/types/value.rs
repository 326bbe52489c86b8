//! # Runtime Value Representation
//!
//! `Value<'a>` is the runtime representation of one decoded field. Text and
//! raw-byte payloads use `Cow` so reads can borrow straight from the backing
//! buffer; multi-byte numeric arrays are materialized because decoding may
//! change their byte order.
//!
//! ## Conversion Rules
//!
//! Numeric values convert to every numeric primitive through the `to_*`
//! family; narrowing follows Rust `as`-cast semantics. Conversions that are
//! not semantically valid are forbidden-conversion errors, surfaced
//! immediately with no partial result:
//!
//! | From | Numeric `to_*` | Explicit unwrap |
//! |------|----------------|-----------------|
//! | integer / float | allowed (narrowing) | n/a |
//! | Bool | forbidden | `as_bool` |
//! | Char | forbidden | `as_char` |
//! | Text | forbidden | `as_str` |
//! | arrays / Struct / Sequence | forbidden | variant access |

use std::borrow::Cow;
use std::fmt;

use eyre::{bail, Result};

use crate::records::Record;
use crate::types::DataType;

#[derive(Debug, Clone)]
pub enum Value<'a> {
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    Char(char),
    Text(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
    Int8s(Vec<i8>),
    Int16s(Vec<i16>),
    UInt16s(Vec<u16>),
    Int32s(Vec<i32>),
    UInt32s(Vec<u32>),
    Int64s(Vec<i64>),
    UInt64s(Vec<u64>),
    Float32s(Vec<f32>),
    Float64s(Vec<f64>),
    Struct(Box<Record>),
    Sequence(Vec<Record>),
}

macro_rules! numeric_cast {
    ($fn_name:ident, $prim:ty) => {
        pub fn $fn_name(&self) -> Result<$prim> {
            Ok(match self {
                Value::Int8(v) => *v as $prim,
                Value::UInt8(v) => *v as $prim,
                Value::Int16(v) => *v as $prim,
                Value::UInt16(v) => *v as $prim,
                Value::Int32(v) => *v as $prim,
                Value::UInt32(v) => *v as $prim,
                Value::Int64(v) => *v as $prim,
                Value::UInt64(v) => *v as $prim,
                Value::Float32(v) => *v as $prim,
                Value::Float64(v) => *v as $prim,
                other => bail!(
                    "forbidden conversion: {} -> {}",
                    other.kind_name(),
                    stringify!($prim)
                ),
            })
        }
    };
}

macro_rules! numeric_array_cast {
    ($fn_name:ident, $prim:ty) => {
        pub fn $fn_name(&self) -> Result<Vec<$prim>> {
            Ok(match self {
                Value::Bytes(v) => v.iter().map(|&x| x as $prim).collect(),
                Value::Int8s(v) => v.iter().map(|&x| x as $prim).collect(),
                Value::Int16s(v) => v.iter().map(|&x| x as $prim).collect(),
                Value::UInt16s(v) => v.iter().map(|&x| x as $prim).collect(),
                Value::Int32s(v) => v.iter().map(|&x| x as $prim).collect(),
                Value::UInt32s(v) => v.iter().map(|&x| x as $prim).collect(),
                Value::Int64s(v) => v.iter().map(|&x| x as $prim).collect(),
                Value::UInt64s(v) => v.iter().map(|&x| x as $prim).collect(),
                Value::Float32s(v) => v.iter().map(|&x| x as $prim).collect(),
                Value::Float64s(v) => v.iter().map(|&x| x as $prim).collect(),
                other => bail!(
                    "forbidden conversion: {} -> [{}]",
                    other.kind_name(),
                    stringify!($prim)
                ),
            })
        }
    };
}

impl<'a> Value<'a> {
    /// Element data type of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int8(_) | Value::Int8s(_) => DataType::Int8,
            Value::UInt8(_) | Value::Bytes(_) => DataType::UInt8,
            Value::Int16(_) | Value::Int16s(_) => DataType::Int16,
            Value::UInt16(_) | Value::UInt16s(_) => DataType::UInt16,
            Value::Int32(_) | Value::Int32s(_) => DataType::Int32,
            Value::UInt32(_) | Value::UInt32s(_) => DataType::UInt32,
            Value::Int64(_) | Value::Int64s(_) => DataType::Int64,
            Value::UInt64(_) | Value::UInt64s(_) => DataType::UInt64,
            Value::Float32(_) | Value::Float32s(_) => DataType::Float32,
            Value::Float64(_) | Value::Float64s(_) => DataType::Float64,
            Value::Bool(_) => DataType::Bool,
            Value::Char(_) => DataType::Char,
            Value::Text(_) => DataType::String,
            Value::Struct(_) => DataType::Struct,
            Value::Sequence(_) => DataType::Sequence,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Value::Bytes(_)
                | Value::Int8s(_)
                | Value::Int16s(_)
                | Value::UInt16s(_)
                | Value::Int32s(_)
                | Value::UInt32s(_)
                | Value::Int64s(_)
                | Value::UInt64s(_)
                | Value::Float32s(_)
                | Value::Float64s(_)
                | Value::Sequence(_)
        )
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Value::Int8(_) => "Int8",
            Value::UInt8(_) => "UInt8",
            Value::Int16(_) => "Int16",
            Value::UInt16(_) => "UInt16",
            Value::Int32(_) => "Int32",
            Value::UInt32(_) => "UInt32",
            Value::Int64(_) => "Int64",
            Value::UInt64(_) => "UInt64",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::Bool(_) => "Bool",
            Value::Char(_) => "Char",
            Value::Text(_) => "Text",
            Value::Bytes(_) => "Bytes",
            Value::Int8s(_) => "Int8s",
            Value::Int16s(_) => "Int16s",
            Value::UInt16s(_) => "UInt16s",
            Value::Int32s(_) => "Int32s",
            Value::UInt32s(_) => "UInt32s",
            Value::Int64s(_) => "Int64s",
            Value::UInt64s(_) => "UInt64s",
            Value::Float32s(_) => "Float32s",
            Value::Float64s(_) => "Float64s",
            Value::Struct(_) => "Struct",
            Value::Sequence(_) => "Sequence",
        }
    }

    /// Element count of an array value, `None` for scalars.
    pub fn array_len(&self) -> Option<usize> {
        match self {
            Value::Bytes(v) => Some(v.len()),
            Value::Int8s(v) => Some(v.len()),
            Value::Int16s(v) => Some(v.len()),
            Value::UInt16s(v) => Some(v.len()),
            Value::Int32s(v) => Some(v.len()),
            Value::UInt32s(v) => Some(v.len()),
            Value::Int64s(v) => Some(v.len()),
            Value::UInt64s(v) => Some(v.len()),
            Value::Float32s(v) => Some(v.len()),
            Value::Float64s(v) => Some(v.len()),
            Value::Sequence(v) => Some(v.len()),
            _ => None,
        }
    }

    numeric_cast!(to_i8, i8);
    numeric_cast!(to_u8, u8);
    numeric_cast!(to_i16, i16);
    numeric_cast!(to_u16, u16);
    numeric_cast!(to_i32, i32);
    numeric_cast!(to_u32, u32);
    numeric_cast!(to_i64, i64);
    numeric_cast!(to_u64, u64);
    numeric_cast!(to_f32, f32);
    numeric_cast!(to_f64, f64);

    numeric_array_cast!(to_i32s, i32);
    numeric_array_cast!(to_i64s, i64);
    numeric_array_cast!(to_f32s, f32);
    numeric_array_cast!(to_f64s, f64);

    /// Explicit unwrap path for Bool; anything else is a forbidden
    /// conversion.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(v) => Ok(*v),
            other => bail!("forbidden conversion: {} -> bool", other.kind_name()),
        }
    }

    /// Explicit unwrap path for Char.
    pub fn as_char(&self) -> Result<char> {
        match self {
            Value::Char(v) => Ok(*v),
            other => bail!("forbidden conversion: {} -> char", other.kind_name()),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Text(v) => Ok(v.as_ref()),
            other => bail!("forbidden conversion: {} -> str", other.kind_name()),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            Value::Bytes(v) => Ok(v.as_ref()),
            other => bail!("forbidden conversion: {} -> bytes", other.kind_name()),
        }
    }

    pub fn as_record(&self) -> Result<&Record> {
        match self {
            Value::Struct(r) => Ok(r),
            other => bail!("forbidden conversion: {} -> record", other.kind_name()),
        }
    }

    pub fn as_records(&self) -> Result<&[Record]> {
        match self {
            Value::Sequence(rs) => Ok(rs),
            other => bail!(
                "forbidden conversion: {} -> record sequence",
                other.kind_name()
            ),
        }
    }

    /// Detach from any borrowed payload.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Text(v) => Value::Text(Cow::Owned(v.into_owned())),
            Value::Bytes(v) => Value::Bytes(Cow::Owned(v.into_owned())),
            Value::Int8(v) => Value::Int8(v),
            Value::UInt8(v) => Value::UInt8(v),
            Value::Int16(v) => Value::Int16(v),
            Value::UInt16(v) => Value::UInt16(v),
            Value::Int32(v) => Value::Int32(v),
            Value::UInt32(v) => Value::UInt32(v),
            Value::Int64(v) => Value::Int64(v),
            Value::UInt64(v) => Value::UInt64(v),
            Value::Float32(v) => Value::Float32(v),
            Value::Float64(v) => Value::Float64(v),
            Value::Bool(v) => Value::Bool(v),
            Value::Char(v) => Value::Char(v),
            Value::Int8s(v) => Value::Int8s(v),
            Value::Int16s(v) => Value::Int16s(v),
            Value::UInt16s(v) => Value::UInt16s(v),
            Value::Int32s(v) => Value::Int32s(v),
            Value::UInt32s(v) => Value::UInt32s(v),
            Value::Int64s(v) => Value::Int64s(v),
            Value::UInt64s(v) => Value::UInt64s(v),
            Value::Float32s(v) => Value::Float32s(v),
            Value::Float64s(v) => Value::Float64s(v),
            Value::Struct(r) => Value::Struct(r),
            Value::Sequence(rs) => Value::Sequence(rs),
        }
    }
}

/// Structural equality for scalar and array values. Records carry no value
/// equality, so Struct and Sequence values never compare equal.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int8(a), Value::Int8(b)) => a == b,
            (Value::UInt8(a), Value::UInt8(b)) => a == b,
            (Value::Int16(a), Value::Int16(b)) => a == b,
            (Value::UInt16(a), Value::UInt16(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::UInt32(a), Value::UInt32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::UInt64(a), Value::UInt64(b)) => a == b,
            (Value::Float32(a), Value::Float32(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Int8s(a), Value::Int8s(b)) => a == b,
            (Value::Int16s(a), Value::Int16s(b)) => a == b,
            (Value::UInt16s(a), Value::UInt16s(b)) => a == b,
            (Value::Int32s(a), Value::Int32s(b)) => a == b,
            (Value::UInt32s(a), Value::UInt32s(b)) => a == b,
            (Value::Int64s(a), Value::Int64s(b)) => a == b,
            (Value::UInt64s(a), Value::UInt64s(b)) => a == b,
            (Value::Float32s(a), Value::Float32s(b)) => a == b,
            (Value::Float64s(a), Value::Float64s(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int8(v) => write!(f, "{}", v),
            Value::UInt8(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::UInt16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            other => write!(f, "<{}>", other.kind_name()),
        }
    }
}
