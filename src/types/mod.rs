//! # Type System
//!
//! The canonical type layer shared by schemas, record decoding, and the
//! scalar array.
//!
//! ## Module Structure
//!
//! - `data_type`: element `DataType` enum with fixed byte widths
//! - `value`: runtime `Value<'a>` with zero-copy text/bytes and narrowing
//!   conversions
//! - `scalar`: zero-rank `ScalarArray` over a single value

pub mod data_type;
pub mod scalar;
pub mod value;

pub use data_type::DataType;
pub use scalar::ScalarArray;
pub use value::Value;
