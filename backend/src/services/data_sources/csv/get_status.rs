use crate::error::ApiError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::responses::StoreStatus;

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    match get_store_status(&state).await {
        Ok(status) => HttpResponse::Ok().json(status),
        Err(e) => e.error_response(),
    }
}

/// Checks both stores off the async executor.
async fn get_store_status(state: &AppState) -> Result<StoreStatus, ApiError> {
    let byte_store = state.byte_store.clone();
    let record_store = state.record_store.clone();

    tokio::task::spawn_blocking(move || StoreStatus {
        byte_store_available: byte_store.is_available(),
        record_store_available: record_store.is_available(),
        record_count: record_store.count().ok(),
    })
    .await
    .map_err(|e| ApiError::Internal(format!("join error: {}", e)))
}
