use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One cleaned row: canonical schema key to trimmed, non-empty value.
pub type ExtractedRecord = BTreeMap<String, String>;

/// Outcome flag of a preview. `Warning` means the file parsed but no row survived extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewStatus {
    Success,
    Warning,
}

/// Bounded summary of an uploaded CSV, returned by the preview endpoint so the
/// user can review the detected columns and a sample of rows before submitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewSummary {
    pub status: PreviewStatus,
    /// `Found X valid rows out of Y total rows`.
    pub message: String,
    /// Number of data rows in the file (header excluded).
    pub total_rows: usize,
    /// Rows that produced an extracted record.
    pub valid_row_count: usize,
    pub skipped_rows: usize,
    /// Raw header names matched to the schema, in header order.
    pub valid_columns: Vec<String>,
    /// Raw header names that were ignored, in header order.
    pub invalid_columns: Vec<String>,
    /// The first extracted records, in file order.
    pub sample_records: Vec<ExtractedRecord>,
    /// Non-fatal issues: header collisions and per-row skip reasons.
    pub errors: Vec<String>,
}
