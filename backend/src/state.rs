//! Shared application state injected into every handler as `web::Data`.

use crate::ingest::schema::SchemaRegistry;
use crate::ingest::IngestLimits;
use crate::storage::{ByteStore, RecordStore};
use std::sync::Arc;

/// Read-only after startup; cloned once per worker.
#[derive(Clone)]
pub struct AppState {
    pub schema: &'static SchemaRegistry,
    pub limits: IngestLimits,
    pub byte_store: Arc<dyn ByteStore>,
    pub record_store: Arc<dyn RecordStore>,
}
