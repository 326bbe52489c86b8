//! # RecordSource - Streaming Record Iteration
//!
//! `RecordSource` is the single-pass, resettable, closeable producer of
//! records. Exhaustion is `Ok(None)`; a decode error leaves the source in an
//! undefined state and the caller should treat it as terminal and `close()`.
//!
//! ## Contract
//!
//! | Call | Meaning |
//! |------|---------|
//! | `next_record()` | next record, or `Ok(None)` when exhausted |
//! | `reset()` | rewind; `false` means the source can no longer be iterated |
//! | `close()` | release source resources; idempotent, safe after exhaustion |
//! | `set_buffer_hint(bytes)` | advisory read-ahead hint, forwarded inward |
//!
//! Wrappers (`LimitSource`, `MapSource`) compose over any source, including
//! other wrappers, and must forward `reset`/`close`/hint to the layer below;
//! none of them pre-reads or buffers records on its own.

use eyre::{ensure, eyre, Result};

use crate::records::Record;
use crate::store::RecordStore;

pub trait RecordSource {
    fn next_record(&mut self) -> Result<Option<Record>>;

    /// Rewind to the first record. `Ok(false)` signals the source cannot be
    /// iterated again; wrappers propagate that absence.
    fn reset(&mut self) -> Result<bool>;

    /// Release whatever the source holds. Safe to call repeatedly and after
    /// exhaustion; a source without resources does nothing.
    fn close(&mut self) {}

    /// Advisory; a layer that cannot act on it still forwards it inward.
    fn set_buffer_hint(&mut self, _bytes: usize) {}
}

impl<T: RecordSource + ?Sized> RecordSource for Box<T> {
    fn next_record(&mut self) -> Result<Option<Record>> {
        (**self).next_record()
    }

    fn reset(&mut self) -> Result<bool> {
        (**self).reset()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn set_buffer_hint(&mut self, bytes: usize) {
        (**self).set_buffer_hint(bytes)
    }
}

/// Range-bound iterator over `[start, start + size)` of a fixed-extent
/// store, decoding one record per pull.
#[derive(Debug)]
pub struct StoreSource {
    store: RecordStore,
    start: usize,
    size: usize,
    pos: usize,
}

impl StoreSource {
    pub fn new(store: RecordStore, start: usize, size: usize) -> Result<Self> {
        let len = store.len().ok_or_else(|| {
            eyre!("unsupported operation: range-bound iteration over a streaming record store")
        })?;
        let end = start
            .checked_add(size)
            .ok_or_else(|| eyre!("invalid selection: record range overflows"))?;
        ensure!(
            end <= len,
            "invalid selection: records {}..{} exceed record count {}",
            start,
            end,
            len
        );
        Ok(Self {
            store,
            start,
            size,
            pos: 0,
        })
    }
}

impl RecordSource for StoreSource {
    fn next_record(&mut self) -> Result<Option<Record>> {
        if self.pos == self.size {
            return Ok(None);
        }
        let record = self.store.record(self.start + self.pos)?;
        self.pos += 1;
        Ok(Some(record))
    }

    fn reset(&mut self) -> Result<bool> {
        self.pos = 0;
        Ok(true)
    }
}

/// Yields at most `limit` records from the wrapped source, however many the
/// source still has.
pub struct LimitSource<S> {
    inner: S,
    limit: usize,
    emitted: usize,
}

impl<S: RecordSource> LimitSource<S> {
    pub fn new(inner: S, limit: usize) -> Self {
        Self {
            inner,
            limit,
            emitted: 0,
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

impl<S: RecordSource> RecordSource for LimitSource<S> {
    fn next_record(&mut self) -> Result<Option<Record>> {
        if self.emitted == self.limit {
            return Ok(None);
        }
        match self.inner.next_record()? {
            Some(record) => {
                self.emitted += 1;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn reset(&mut self) -> Result<bool> {
        self.emitted = 0;
        self.inner.reset()
    }

    fn close(&mut self) {
        self.inner.close()
    }

    fn set_buffer_hint(&mut self, bytes: usize) {
        self.inner.set_buffer_hint(bytes)
    }
}

/// Applies a record-to-record transformation to every yielded record.
/// Exhaustion and errors of the wrapped source pass through untouched.
pub struct MapSource<S, F> {
    inner: S,
    transform: F,
}

impl<S, F> MapSource<S, F>
where
    S: RecordSource,
    F: FnMut(Record) -> Result<Record>,
{
    pub fn new(inner: S, transform: F) -> Self {
        Self { inner, transform }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

impl<S, F> RecordSource for MapSource<S, F>
where
    S: RecordSource,
    F: FnMut(Record) -> Result<Record>,
{
    fn next_record(&mut self) -> Result<Option<Record>> {
        match self.inner.next_record()? {
            Some(record) => Ok(Some((self.transform)(record)?)),
            None => Ok(None),
        }
    }

    fn reset(&mut self) -> Result<bool> {
        self.inner.reset()
    }

    fn close(&mut self) {
        self.inner.close()
    }

    fn set_buffer_hint(&mut self, bytes: usize) {
        self.inner.set_buffer_hint(bytes)
    }
}
