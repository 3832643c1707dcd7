use super::{RecordStore, StorageError};
use crate::ingest::submission::SubmittedRecord;
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{params, Connection};
use std::path::PathBuf;

/// Default number of records written per transaction.
pub const DEFAULT_BATCH_SIZE: usize = 25;

/// SQLite-backed record store. Each record becomes one `user_data` row keyed by
/// its entry id, with the non-empty fields kept as a JSON object.
pub struct SqliteRecordStore {
    path: PathBuf,
    batch_size: usize,
}

impl SqliteRecordStore {
    /// Opens the database file and creates the `user_data` table if missing.
    pub fn new(path: impl Into<PathBuf>, batch_size: usize) -> Result<Self, StorageError> {
        let store = Self {
            path: path.into(),
            batch_size: batch_size.max(1),
        };
        let conn = store.open()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS user_data (
                entry_id TEXT PRIMARY KEY,
                source_file TEXT NOT NULL,
                created_at TEXT NOT NULL,
                fields TEXT NOT NULL
            )",
            [],
        )?;
        Ok(store)
    }

    fn open(&self) -> Result<Connection, StorageError> {
        Ok(Connection::open(&self.path)?)
    }
}

impl RecordStore for SqliteRecordStore {
    fn write_records(
        &self,
        source_key: &str,
        created_at: DateTime<Utc>,
        records: &[SubmittedRecord],
    ) -> Result<usize, StorageError> {
        let mut conn = self.open()?;
        let created_at = created_at.to_rfc3339();
        let mut written = 0;

        for chunk in records.chunks(self.batch_size) {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare_cached(
                    "INSERT INTO user_data (entry_id, source_file, created_at, fields)
                     VALUES (?1, ?2, ?3, ?4)",
                )?;
                for record in chunk {
                    let fields = serde_json::to_string(&record.fields)?;
                    stmt.execute(params![
                        record.entry_id.to_string(),
                        source_key,
                        created_at,
                        fields
                    ])?;
                }
            }
            tx.commit()?;
            written += chunk.len();
            debug!("committed {} of {} records", written, records.len());
        }

        Ok(written)
    }

    fn is_available(&self) -> bool {
        self.count().is_ok()
    }

    fn count(&self) -> Result<u64, StorageError> {
        let conn = self.open()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM user_data", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
