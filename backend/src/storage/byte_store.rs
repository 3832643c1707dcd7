use super::{ByteStore, StorageError};
use crate::ingest::submission::ObjectMetadata;
use std::fs;
use std::path::{Path, PathBuf};

/// Keeps uploads as files under a root directory, each with a
/// `<key>.meta.json` sidecar describing it.
pub struct FsByteStore {
    root: PathBuf,
}

impl FsByteStore {
    /// Opens the store, creating the root directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn metadata_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.meta.json", key))
    }
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\'])
        && Path::new(key).file_name().is_some()
}

impl ByteStore for FsByteStore {
    fn put_object(
        &self,
        key: &str,
        bytes: &[u8],
        metadata: &ObjectMetadata,
    ) -> Result<(), StorageError> {
        if !is_plain_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        fs::write(self.object_path(key), bytes)?;
        fs::write(self.metadata_path(key), serde_json::to_vec_pretty(metadata)?)?;
        Ok(())
    }

    fn is_available(&self) -> bool {
        fs::metadata(&self.root)
            .map(|m| m.is_dir() && !m.permissions().readonly())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn metadata(len: usize) -> ObjectMetadata {
        ObjectMetadata {
            original_filename: "users.csv".to_string(),
            content_length: len,
            md5: "abc".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_put_object_writes_bytes_and_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsByteStore::new(dir.path().join("uploads")).unwrap();
        let bytes = b"user_id\n1\n";

        store
            .put_object("user_data_2024-01-01_12-00-00.csv", bytes, &metadata(bytes.len()))
            .unwrap();

        let stored = fs::read(store.object_path("user_data_2024-01-01_12-00-00.csv")).unwrap();
        assert_eq!(stored, bytes.to_vec());

        let sidecar: serde_json::Value = serde_json::from_slice(
            &fs::read(dir.path().join("uploads/user_data_2024-01-01_12-00-00.csv.meta.json"))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(sidecar["original_filename"], "users.csv");
        assert_eq!(sidecar["content_length"], 10);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsByteStore::new(dir.path()).unwrap();
        for key in ["../escape.csv", "nested/key.csv", "..", ""] {
            let err = store.put_object(key, b"x", &metadata(1)).unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(_)));
        }
    }

    #[test]
    fn test_availability() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsByteStore::new(dir.path()).unwrap();
        assert!(store.is_available());

        let gone = FsByteStore {
            root: dir.path().join("missing"),
        };
        assert!(!gone.is_available());
    }
}
