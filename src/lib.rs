//! # ndrec - In-Memory Data Model for Scientific Data Access
//!
//! ndrec is the data model underneath a scientific-data access library: it
//! represents N-dimensional arrays and heterogeneous fixed/variable-layout
//! records ("structures") decoded on demand from raw byte storage, without
//! copying unless the encoding requires it. This crate prioritizes:
//!
//! - **Zero-copy data access**: record views borrow from shared buffers
//! - **Exact offset arithmetic**: strided indexing with rank-specialized
//!   fast paths
//! - **Lazy, composable iteration**: streaming record sources that wrap,
//!   limit, and transform without pre-materializing anything
//!
//! ## Quick Start
//!
//! ```ignore
//! use ndrec::{ByteBuf, ByteOrder, DataType, FieldDef, FixedStore, RecordSchema, Shape};
//! use std::sync::Arc;
//!
//! let schema = Arc::new(RecordSchema::packed(vec![
//!     FieldDef::scalar("id", DataType::Int32),
//!     FieldDef::scalar("temp", DataType::Float64),
//! ])?);
//!
//! let store = FixedStore::new(schema, Shape::vector(100), buf, ByteOrder::Big)?
//!     .into_store();
//! let record = store.record(7)?;
//! let temp = record.get_f64("temp")?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------+
//! |      Record Sources (limit / transform)     |
//! +--------------------------------------------+
//! |  Record Stores (fixed/positioned/section/   |
//! |        composite/materialized/streaming)    |
//! +---------------------+----------------------+
//! |  Records & Schema   |   Index & Range      |
//! |  (decode by name)   |   (offset arithmetic)|
//! +---------------------+----------------------+
//! |       ByteBuf (shared read-only bytes)      |
//! +--------------------------------------------+
//! ```
//!
//! File decoding, caching, and the high-level dataset API live above this
//! crate; nothing here touches the network or the disk.
//!
//! ## Module Overview
//!
//! - [`index`]: shapes and strided index cursors with rank specialization
//! - [`range`]: named one-dimensional selections and their composites
//! - [`buffer`]: shared byte payload with explicit-endianness reads
//! - [`types`]: element types, runtime values, the zero-rank scalar array
//! - [`schema`]: field definitions and record layouts
//! - [`records`]: decoded records, proxies, and the record factory
//! - [`store`]: record stores and the streaming record-source chain

pub mod buffer;
pub mod index;
pub mod range;
pub mod records;
pub mod schema;
pub mod store;
pub mod types;

pub use buffer::{ByteBuf, ByteOrder};
pub use index::{Index, Shape};
pub use range::{CompositeRange, Range};
pub use records::{merge, record_of, Record};
pub use schema::{FieldDef, RecordSchema};
pub use store::{
    CompositeStore, FixedStore, LimitSource, MapSource, MaterializedStore, PositionedStore,
    RecordSource, RecordStore, SectionStore, StoreSource, StreamingStore,
};
pub use types::{DataType, ScalarArray, Value};
