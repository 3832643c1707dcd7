//! Upload checks and CSV decoding.
//!
//! The checks run in a fixed order: file type, then size, then decoding. The
//! size limit is enforced on the raw buffer so an oversized upload is rejected
//! without being parsed.

use super::error::{IngestError, Result};
use csv::{ReaderBuilder, Trim};

/// Content types browsers and clients commonly send for CSV files.
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &[
    "text/csv",
    "application/csv",
    "text/plain",
    "application/vnd.ms-excel",
    "application/octet-stream",
];

/// Header plus data rows of an uploaded file. Cells are trimmed and aligned
/// with the header by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub header: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line in the file where the record starts (the header is line 1).
    pub line: usize,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// Rejects anything that is not named `*.csv`, and any asserted content type
/// outside [`ACCEPTED_CONTENT_TYPES`].
pub fn check_file_type(filename: &str, content_type: Option<&str>) -> Result<()> {
    if !filename.trim().to_lowercase().ends_with(".csv") {
        return Err(IngestError::Type("Only .csv files are accepted".to_string()));
    }

    if let Some(content_type) = content_type {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        if !essence.is_empty() && !ACCEPTED_CONTENT_TYPES.contains(&essence.as_str()) {
            return Err(IngestError::Type(format!(
                "Unsupported content type '{}'; only CSV uploads are accepted",
                essence
            )));
        }
    }
    Ok(())
}

pub fn check_size(len: usize, max_bytes: usize) -> Result<()> {
    if len > max_bytes {
        return Err(IngestError::Size {
            actual: len,
            limit: max_bytes,
        });
    }
    Ok(())
}

/// Decodes a UTF-8 CSV buffer into a [`ParsedTable`].
///
/// Fails when the bytes are not UTF-8, when there is no header, or when there
/// are no data rows. Repeated header names are kept as-is; the classifier
/// decides which occurrence is used. Ragged rows are
/// accepted: short rows leave trailing cells absent and long rows keep their
/// extra cells, which no header column refers to.
pub fn parse_table(bytes: &[u8]) -> Result<ParsedTable> {
    let text = std::str::from_utf8(bytes).map_err(|_| {
        IngestError::Format("File encoding not supported. Please use UTF-8 encoding".to_string())
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::Format(format!("Invalid CSV format: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    if header.is_empty() {
        return Err(IngestError::Format("Empty CSV file".to_string()));
    }

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| IngestError::Format(format!("Invalid CSV format: {}", e)))?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);
        rows.push(RawRow {
            line,
            cells: record.iter().map(str::to_string).collect(),
        });
    }

    if rows.is_empty() {
        return Err(IngestError::Format(
            "CSV file has a header but no data rows".to_string(),
        ));
    }

    Ok(ParsedTable { header, rows })
}
