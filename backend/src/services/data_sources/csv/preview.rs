use super::intake::read_upload;
use crate::error::ApiError;
use crate::ingest;
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::csv::PreviewSummary;
use log::info;

/// HTTP handler wrapper for `POST /preview`.
///
/// - On success: `200 OK` with the `PreviewSummary` as JSON.
/// - On failure: the error status with an `ErrorResponse` body.
pub(crate) async fn process(payload: Multipart, state: web::Data<AppState>) -> impl Responder {
    match preview_upload(payload, &state).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.error_response(),
    }
}

async fn preview_upload(payload: Multipart, state: &AppState) -> Result<PreviewSummary, ApiError> {
    let upload = read_upload(payload, state.limits.max_upload_bytes).await?;
    let summary = ingest::preview(&upload, state.schema, &state.limits)?;
    info!(
        "preview of '{}': {} of {} rows valid",
        upload.filename, summary.valid_row_count, summary.total_rows
    );
    Ok(summary)
}
