//! # StreamingStore - Records of Indeterminate Extent
//!
//! A streaming store is backed by a record source instead of fixed storage:
//! its size is unknown until the stream runs dry. Random-access decode and
//! sectioning are meaningless without a fixed extent and fail loudly.
//!
//! The store owns exactly one iterator for its lifetime. `source()` resets
//! that iterator and hands back a handle to it; a second request resets the
//! same iterator again rather than allocating a new one. Access to the
//! iterator is serialized through a mutex so the store itself stays
//! shareable.

use std::fmt;
use std::sync::Arc;

use eyre::Result;
use parking_lot::Mutex;

use crate::index::Shape;
use crate::records::Record;
use crate::schema::RecordSchema;
use crate::store::source::RecordSource;

#[derive(Clone)]
pub struct StreamingStore {
    schema: Arc<RecordSchema>,
    shape: Shape,
    shared: Arc<StreamShared>,
}

struct StreamShared {
    source: Mutex<Box<dyn RecordSource + Send>>,
}

impl StreamingStore {
    pub fn new(schema: Arc<RecordSchema>, source: Box<dyn RecordSource + Send>) -> Self {
        Self {
            schema,
            // Indeterminate extent: the shape reports no records.
            shape: Shape::vector(0),
            shared: Arc::new(StreamShared {
                source: Mutex::new(source),
            }),
        }
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Reset the store's single iterator and hand back a handle to it.
    pub(crate) fn handle(&self) -> Result<Box<dyn RecordSource>> {
        self.shared.source.lock().reset()?;
        tracing::trace!("streaming store iterator reset");
        Ok(Box::new(StreamHandle {
            shared: Arc::clone(&self.shared),
        }))
    }
}

impl fmt::Debug for StreamingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingStore")
            .field("schema_fields", &self.schema.field_count())
            .finish_non_exhaustive()
    }
}

/// Handle onto the store's single iterator; every call goes through the
/// store's lock, so two handles drive the same underlying iterator.
struct StreamHandle {
    shared: Arc<StreamShared>,
}

impl RecordSource for StreamHandle {
    fn next_record(&mut self) -> Result<Option<Record>> {
        self.shared.source.lock().next_record()
    }

    fn reset(&mut self) -> Result<bool> {
        self.shared.source.lock().reset()
    }

    fn close(&mut self) {
        self.shared.source.lock().close()
    }

    fn set_buffer_hint(&mut self, bytes: usize) {
        self.shared.source.lock().set_buffer_hint(bytes)
    }
}
