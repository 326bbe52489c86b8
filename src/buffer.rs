//! # ByteBuf - Shared Read-Only Byte Payload
//!
//! `ByteBuf` wraps the raw bytes a record store decodes from. The payload is
//! reference-counted and immutable: sections and composites built over the
//! same store share it without copying, and cloning a `ByteBuf` clones the
//! handle, not the bytes.
//!
//! ## Byte Order
//!
//! Byte order is an explicit parameter of every multi-byte read. The buffer
//! itself carries no order state, so records with per-field endianness
//! overrides decode by passing a different order per call, and concurrent
//! readers never observe each other's order switches.
//!
//! ## Bounds
//!
//! Every read is bounds-checked. A read that runs past the end of the buffer
//! is a decode failure surfaced to the caller; nothing is read partially.
//!
//! ## Decoding
//!
//! Multi-byte values go through zerocopy's unaligned byteorder wrappers, so
//! reads at arbitrary offsets are well-defined without manual byte shuffling.

use std::sync::Arc;

use eyre::{ensure, eyre, Result};
use zerocopy::byteorder::{BigEndian, LittleEndian, F32, F64, I16, I32, I64, U16, U32, U64};
use zerocopy::FromBytes;

/// Endianness of a multi-byte read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }
}

#[derive(Debug, Clone)]
pub struct ByteBuf {
    data: Arc<[u8]>,
}

macro_rules! scalar_read {
    ($fn_name:ident, $prim:ty, $width:expr, $be:ty, $le:ty) => {
        pub fn $fn_name(&self, pos: usize, order: ByteOrder) -> Result<$prim> {
            let bytes = self.get_bytes(pos, $width)?;
            Ok(match order {
                ByteOrder::Big => <$be>::read_from_bytes(bytes)
                    .map_err(|_| eyre!("malformed {}-byte read at offset {}", $width, pos))?
                    .get(),
                ByteOrder::Little => <$le>::read_from_bytes(bytes)
                    .map_err(|_| eyre!("malformed {}-byte read at offset {}", $width, pos))?
                    .get(),
            })
        }
    };
}

macro_rules! slice_read {
    ($fn_name:ident, $prim:ty, $width:expr, $be:ty, $le:ty) => {
        pub fn $fn_name(&self, pos: usize, count: usize, order: ByteOrder) -> Result<Vec<$prim>> {
            let byte_len = count
                .checked_mul($width)
                .ok_or_else(|| eyre!("read of {} elements at offset {} overflows", count, pos))?;
            let bytes = self.get_bytes(pos, byte_len)?;
            Ok(match order {
                ByteOrder::Big => <[$be]>::ref_from_bytes(bytes)
                    .map_err(|_| eyre!("malformed bulk read at offset {}", pos))?
                    .iter()
                    .map(|v| v.get())
                    .collect(),
                ByteOrder::Little => <[$le]>::ref_from_bytes(bytes)
                    .map_err(|_| eyre!("malformed bulk read at offset {}", pos))?
                    .iter()
                    .map(|v| v.get())
                    .collect(),
            })
        }
    };
}

impl ByteBuf {
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self { data: data.into() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// True when both handles share one payload.
    pub fn shares_storage_with(&self, other: &ByteBuf) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Zero-copy borrow of `count` bytes at `pos`.
    pub fn get_bytes(&self, pos: usize, count: usize) -> Result<&[u8]> {
        let end = pos
            .checked_add(count)
            .ok_or_else(|| eyre!("read of {} bytes at offset {} overflows", count, pos))?;
        ensure!(
            end <= self.data.len(),
            "read of {} bytes at offset {} runs past end of buffer (len {})",
            count,
            pos,
            self.data.len()
        );
        Ok(&self.data[pos..end])
    }

    pub fn get_u8(&self, pos: usize) -> Result<u8> {
        Ok(self.get_bytes(pos, 1)?[0])
    }

    pub fn get_i8(&self, pos: usize) -> Result<i8> {
        Ok(self.get_bytes(pos, 1)?[0] as i8)
    }

    scalar_read!(get_i16, i16, 2, I16<BigEndian>, I16<LittleEndian>);
    scalar_read!(get_u16, u16, 2, U16<BigEndian>, U16<LittleEndian>);
    scalar_read!(get_i32, i32, 4, I32<BigEndian>, I32<LittleEndian>);
    scalar_read!(get_u32, u32, 4, U32<BigEndian>, U32<LittleEndian>);
    scalar_read!(get_i64, i64, 8, I64<BigEndian>, I64<LittleEndian>);
    scalar_read!(get_u64, u64, 8, U64<BigEndian>, U64<LittleEndian>);
    scalar_read!(get_f32, f32, 4, F32<BigEndian>, F32<LittleEndian>);
    scalar_read!(get_f64, f64, 8, F64<BigEndian>, F64<LittleEndian>);

    slice_read!(get_i16s, i16, 2, I16<BigEndian>, I16<LittleEndian>);
    slice_read!(get_u16s, u16, 2, U16<BigEndian>, U16<LittleEndian>);
    slice_read!(get_i32s, i32, 4, I32<BigEndian>, I32<LittleEndian>);
    slice_read!(get_u32s, u32, 4, U32<BigEndian>, U32<LittleEndian>);
    slice_read!(get_i64s, i64, 8, I64<BigEndian>, I64<LittleEndian>);
    slice_read!(get_u64s, u64, 8, U64<BigEndian>, U64<LittleEndian>);
    slice_read!(get_f32s, f32, 4, F32<BigEndian>, F32<LittleEndian>);
    slice_read!(get_f64s, f64, 8, F64<BigEndian>, F64<LittleEndian>);

    pub fn get_i8s(&self, pos: usize, count: usize) -> Result<Vec<i8>> {
        Ok(self
            .get_bytes(pos, count)?
            .iter()
            .map(|&b| b as i8)
            .collect())
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}
