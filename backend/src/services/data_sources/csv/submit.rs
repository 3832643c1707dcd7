use super::intake::read_upload;
use crate::error::ApiError;
use crate::ingest;
use crate::state::AppState;
use crate::storage;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use common::responses::SubmitResponse;

/// HTTP handler wrapper for `POST /submit`.
///
/// - On success: `200 OK` with a `SubmitResponse` as JSON.
/// - On failure: the error status with an `ErrorResponse` body.
pub(crate) async fn process(payload: Multipart, state: web::Data<AppState>) -> impl Responder {
    match submit_upload(payload, &state).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.error_response(),
    }
}

/// Runs the pipeline, then stores the raw file and its records on the
/// blocking pool.
async fn submit_upload(payload: Multipart, state: &AppState) -> Result<SubmitResponse, ApiError> {
    let upload = read_upload(payload, state.limits.max_upload_bytes).await?;
    let package = ingest::submit(upload, state.schema, &state.limits, Utc::now())?;
    let object_key = package.object_key.clone();

    let byte_store = state.byte_store.clone();
    let record_store = state.record_store.clone();
    let written = tokio::task::spawn_blocking(move || {
        storage::persist(&package, byte_store.as_ref(), record_store.as_ref())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("join error: {}", e)))??;

    Ok(SubmitResponse {
        status: if written > 0 { "success" } else { "warning" }.to_string(),
        message: format!("Stored {} records from {}", written, object_key),
        object_key,
        records_written: written,
    })
}
