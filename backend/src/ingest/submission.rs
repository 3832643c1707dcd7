use super::Upload;
use chrono::{DateTime, Utc};
use common::model::csv::ExtractedRecord;
use md5::Context;
use serde::Serialize;
use uuid::Uuid;

/// Descriptive metadata stored next to the raw upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectMetadata {
    pub original_filename: String,
    pub content_length: usize,
    /// Hex MD5 of the raw bytes.
    pub md5: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedRecord {
    pub entry_id: Uuid,
    pub fields: ExtractedRecord,
}

/// Everything the storage collaborators need for one submit action.
#[derive(Debug, Clone)]
pub struct SubmissionPackage {
    pub object_key: String,
    pub metadata: ObjectMetadata,
    /// The upload exactly as received.
    pub raw_bytes: Vec<u8>,
    pub records: Vec<SubmittedRecord>,
}

/// `user_data_{YYYY-MM-DD_HH-MM-SS}.csv`, in UTC.
pub fn object_key_for(at: DateTime<Utc>) -> String {
    format!("user_data_{}.csv", at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Packages an upload and its records for persistence.
///
/// Every record gets a fresh random v4 id. Encoding the same upload twice yields
/// the same record contents under disjoint ids, so a resubmission is stored as a
/// new record set.
pub fn encode(upload: Upload, records: Vec<ExtractedRecord>, at: DateTime<Utc>) -> SubmissionPackage {
    let mut hasher = Context::new();
    hasher.consume(&upload.bytes);

    SubmissionPackage {
        object_key: object_key_for(at),
        metadata: ObjectMetadata {
            original_filename: upload.filename,
            content_length: upload.bytes.len(),
            md5: format!("{:x}", hasher.finalize()),
            uploaded_at: at,
        },
        raw_bytes: upload.bytes,
        records: records
            .into_iter()
            .map(|fields| SubmittedRecord {
                entry_id: Uuid::new_v4(),
                fields,
            })
            .collect(),
    }
}
