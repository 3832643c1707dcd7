//! Storage collaborators for the submit path.
//!
//! The ingestion core never touches storage directly: it produces a
//! [`SubmissionPackage`] and [`persist`] hands its two halves to a
//! [`ByteStore`] (raw upload) and a [`RecordStore`] (cleaned records). Both
//! traits are blocking; async callers run them on the blocking pool.

pub mod byte_store;
#[cfg(test)]
pub(crate) mod memory;
pub mod record_store;

use crate::ingest::submission::{ObjectMetadata, SubmissionPackage, SubmittedRecord};
use chrono::{DateTime, Utc};
use log::info;
use thiserror::Error;

pub use byte_store::FsByteStore;
pub use record_store::SqliteRecordStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Object key that would escape the store's root.
    #[error("Invalid object key: {0}")]
    InvalidKey(String),
}

/// Persists raw uploads verbatim under a key.
pub trait ByteStore: Send + Sync {
    fn put_object(
        &self,
        key: &str,
        bytes: &[u8],
        metadata: &ObjectMetadata,
    ) -> Result<(), StorageError>;

    fn is_available(&self) -> bool;
}

/// Persists cleaned records keyed by their entry id.
pub trait RecordStore: Send + Sync {
    /// Writes all records, tagged with the key of the file they came from.
    /// Returns the number of records written.
    fn write_records(
        &self,
        source_key: &str,
        created_at: DateTime<Utc>,
        records: &[SubmittedRecord],
    ) -> Result<usize, StorageError>;

    fn is_available(&self) -> bool;

    fn count(&self) -> Result<u64, StorageError>;
}

/// Stores the raw upload first, then its records. A failure part way through
/// is reported as-is; retrying means submitting again, which mints new ids.
pub fn persist(
    package: &SubmissionPackage,
    bytes: &dyn ByteStore,
    records: &dyn RecordStore,
) -> Result<usize, StorageError> {
    bytes.put_object(&package.object_key, &package.raw_bytes, &package.metadata)?;
    info!(
        "stored upload '{}' as {} ({} bytes)",
        package.metadata.original_filename, package.object_key, package.metadata.content_length
    );

    let written = records.write_records(
        &package.object_key,
        package.metadata.uploaded_at,
        &package.records,
    )?;
    info!("wrote {} records from {}", written, package.object_key);
    Ok(written)
}
