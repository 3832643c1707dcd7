//! HTTP endpoints for CSV user-data uploads.
//!
//! The provided routes are:
//! - `POST /api/data_sources/csv/preview`: multipart/form-data upload with a `file` part.
//!   Runs the ingestion pipeline and returns a `PreviewSummary` (row and column counts, the
//!   first records, and any skipped-row reasons). Nothing is stored.
//!
//! - `POST /api/data_sources/csv/submit`: same upload shape. Runs the pipeline, stores the raw
//!   file through the byte store and every extracted record, under a freshly generated id,
//!   through the record store. Submitting the same file twice stores two record sets.
//!
//! - `GET /api/data_sources/csv/schema`: the recognized columns and their value rules.
//!
//! - `GET /api/data_sources/csv/status`: whether the byte and record stores are reachable,
//!   and how many records the record store holds.
//!
//! Failures are returned as `{"error": "<ErrorKind>", "message": "..."}`.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod get_status;
mod intake;
mod preview;
mod schema;
mod submit;

const API_PATH: &str = "/api/data_sources/csv";

/// Configures and returns the Actix scope for CSV upload routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        // Validate and summarize without storing.
        .route("/preview", post().to(preview::process))
        // Validate and persist the file and its records.
        .route("/submit", post().to(submit::process))
        .route("/schema", get().to(schema::process))
        .route("/status", get().to(get_status::process))
}
