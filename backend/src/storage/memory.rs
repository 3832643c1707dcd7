//! In-memory stores for tests.

use super::{ByteStore, RecordStore, StorageError};
use crate::ingest::submission::{ObjectMetadata, SubmittedRecord};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryByteStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail: bool,
}

impl MemoryByteStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

impl ByteStore for MemoryByteStore {
    fn put_object(
        &self,
        key: &str,
        bytes: &[u8],
        _metadata: &ObjectMetadata,
    ) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Io(std::io::Error::other("store offline")));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn is_available(&self) -> bool {
        !self.fail
    }
}

#[derive(Default)]
pub struct MemoryRecordStore {
    rows: Mutex<Vec<(String, SubmittedRecord)>>,
}

impl MemoryRecordStore {
    pub fn rows(&self) -> Vec<(String, SubmittedRecord)> {
        self.rows.lock().unwrap().clone()
    }
}

impl RecordStore for MemoryRecordStore {
    fn write_records(
        &self,
        source_key: &str,
        _created_at: DateTime<Utc>,
        records: &[SubmittedRecord],
    ) -> Result<usize, StorageError> {
        let mut rows = self.rows.lock().unwrap();
        rows.extend(
            records
                .iter()
                .map(|r| (source_key.to_string(), r.clone())),
        );
        Ok(records.len())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn count(&self) -> Result<u64, StorageError> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}
