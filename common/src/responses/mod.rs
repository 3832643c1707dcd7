use serde::{Deserialize, Serialize};

/// Body of every failed request: `{"error": "<ErrorKind>", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Body returned once a submitted file and its records have been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// `success` when records were written, `warning` when the file held none.
    pub status: String,
    pub message: String,
    /// Key under which the raw upload was stored.
    pub object_key: String,
    pub records_written: usize,
}

/// Reachability of the two storage collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatus {
    pub byte_store_available: bool,
    pub record_store_available: bool,
    /// `None` when the record store could not be queried.
    pub record_count: Option<u64>,
}
