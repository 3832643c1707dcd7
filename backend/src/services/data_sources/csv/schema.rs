use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};

/// Lists the recognized columns and their value rules.
pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.schema.describe())
}
