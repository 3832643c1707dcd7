//! CSV ingestion pipeline.
//!
//! An upload goes through four stages: the parser checks and decodes it, the
//! classifier matches its header against a [`schema::SchemaRegistry`], the
//! extractor turns each row into a cleaned record, and a terminal stage either
//! summarizes the result ([`preview`]) or packages it for storage ([`submit`]).
//!
//! Every stage is a synchronous transform over in-memory data and holds no
//! state between calls. Persistence lives in `crate::storage`.

pub mod classifier;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod preview;
pub mod schema;
pub mod submission;

use chrono::{DateTime, Utc};
use common::model::csv::PreviewSummary;
use log::debug;

pub use error::{IngestError, Result};
use classifier::ColumnClassification;
use extractor::Extraction;
use parser::ParsedTable;
use schema::SchemaRegistry;
use submission::SubmissionPackage;

/// A file as received from the transport layer.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    /// Content type asserted by the client, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Size bounds applied to uploads and previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestLimits {
    pub max_upload_bytes: usize,
    pub preview_rows: usize,
    pub max_reported_errors: usize,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            max_upload_bytes: 5 * 1024 * 1024,
            preview_rows: 10,
            max_reported_errors: 10,
        }
    }
}

struct Prepared {
    table: ParsedTable,
    classification: ColumnClassification,
    extraction: Extraction,
}

/// Validates, parses, classifies and extracts an upload without persisting anything.
pub fn preview(
    upload: &Upload,
    schema: &SchemaRegistry,
    limits: &IngestLimits,
) -> Result<PreviewSummary> {
    let prepared = prepare(upload, schema, limits)?;
    Ok(preview::build_preview(
        &prepared.table,
        &prepared.classification,
        &prepared.extraction,
        limits,
    ))
}

/// Runs the same stages as [`preview`] and packages the upload and its records
/// for the storage collaborators. Record ids are minted on every call.
pub fn submit(
    upload: Upload,
    schema: &SchemaRegistry,
    limits: &IngestLimits,
    at: DateTime<Utc>,
) -> Result<SubmissionPackage> {
    let prepared = prepare(&upload, schema, limits)?;
    Ok(submission::encode(upload, prepared.extraction.records, at))
}

fn prepare(upload: &Upload, schema: &SchemaRegistry, limits: &IngestLimits) -> Result<Prepared> {
    parser::check_file_type(&upload.filename, upload.content_type.as_deref())?;
    parser::check_size(upload.bytes.len(), limits.max_upload_bytes)?;

    let table = parser::parse_table(&upload.bytes)?;
    debug!(
        "parsed '{}': {} columns, {} rows",
        upload.filename,
        table.header.len(),
        table.rows.len()
    );

    let classification = classifier::classify(&table.header, schema)?;
    let extraction = extractor::extract(&table, &classification, schema);

    Ok(Prepared {
        table,
        classification,
        extraction,
    })
}
