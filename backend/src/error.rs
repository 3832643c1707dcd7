//! Error boundary: every failure leaving the service becomes an
//! `{"error": kind, "message": text}` body.

use crate::ingest::IngestError;
use crate::storage::StorageError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::ErrorResponse;
use log::{error, warn};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Detail is logged, never returned.
    #[error("Failed to store the uploaded data")]
    Storage(#[from] StorageError),

    #[error("The upload could not be processed")]
    Internal(String),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Ingest(e) => e.kind(),
            ApiError::Storage(_) => "StorageError",
            ApiError::Internal(_) => "InternalError",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Ingest(IngestError::Type(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Ingest(IngestError::Size { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Ingest(IngestError::Format(_)) => StatusCode::BAD_REQUEST,
            ApiError::Ingest(IngestError::Schema(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Ingest(e) => warn!("rejected upload ({}): {}", e.kind(), e),
            ApiError::Storage(e) => error!("storage failure: {}", e),
            ApiError::Internal(detail) => error!("internal failure: {}", detail),
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        })
    }
}
