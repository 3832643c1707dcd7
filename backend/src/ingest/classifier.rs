use super::error::{IngestError, Result};
use super::schema::SchemaRegistry;
use log::debug;
use std::collections::HashMap;

/// A header column matched to a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Position of the column in the header.
    pub index: usize,
    /// Canonical schema key.
    pub key: String,
}

/// Partition of a header into recognized and ignored columns.
///
/// `valid_columns` and `invalid_columns` hold distinct names, in header order.
/// They are disjoint and together cover every header name. A name repeated in
/// the header is listed once. Every mapping points at a valid column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnClassification {
    pub valid_columns: Vec<String>,
    pub invalid_columns: Vec<String>,
    pub mappings: Vec<ColumnMapping>,
    /// Header collisions, reported to the user and otherwise ignored.
    pub warnings: Vec<String>,
}

/// Classifies header names against the schema, case-insensitively.
///
/// Unknown columns land in `invalid_columns` without error; repeats of an
/// unknown name are folded silently. When several header positions map to the
/// same canonical key the leftmost wins and every later one is ignored with a
/// warning. A later spelling that differs from the winner's (`EMAIL` after
/// `email`) is also listed in `invalid_columns`. A header with no recognized
/// column at all is a [`IngestError::Schema`].
pub fn classify(header: &[String], schema: &SchemaRegistry) -> Result<ColumnClassification> {
    let mut valid_columns: Vec<String> = Vec::new();
    let mut invalid_columns: Vec<String> = Vec::new();
    let mut mappings: Vec<ColumnMapping> = Vec::new();
    let mut warnings = Vec::new();
    let mut claimed: HashMap<&str, &str> = HashMap::new();

    for (index, raw) in header.iter().enumerate() {
        match schema.canonical_key(raw) {
            Some(key) => {
                if let Some(first) = claimed.get(key).copied() {
                    if raw == first {
                        warnings.push(format!(
                            "Header: column '{}' (position {}) repeats an earlier column; only the first is used",
                            raw,
                            index + 1
                        ));
                    } else {
                        warnings.push(format!(
                            "Header: column '{}' duplicates '{}' (both map to '{}'); only '{}' is used",
                            raw, first, key, first
                        ));
                        if !valid_columns.contains(raw) && !invalid_columns.contains(raw) {
                            invalid_columns.push(raw.clone());
                        }
                    }
                } else {
                    claimed.insert(key, raw.as_str());
                    valid_columns.push(raw.clone());
                    mappings.push(ColumnMapping {
                        index,
                        key: key.to_string(),
                    });
                }
            }
            None => {
                if !invalid_columns.contains(raw) {
                    invalid_columns.push(raw.clone());
                }
            }
        }
    }

    if valid_columns.is_empty() {
        let expected: Vec<&str> = schema.field_names().collect();
        return Err(IngestError::Schema(format!(
            "No recognized columns found. Expected columns: {}",
            expected.join(", ")
        )));
    }

    debug!(
        "classified header: {} recognized, {} ignored",
        valid_columns.len(),
        invalid_columns.len()
    );

    Ok(ColumnClassification {
        valid_columns,
        invalid_columns,
        mappings,
        warnings,
    })
}
