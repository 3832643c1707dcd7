mod config;
mod error;
mod ingest;
mod services;
mod state;
mod storage;

use crate::config::AppConfig;
use crate::ingest::schema::USER_DATA_SCHEMA;
use crate::state::AppState;
use crate::storage::{FsByteStore, SqliteRecordStore};
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    let byte_store = FsByteStore::new(&config.storage_dir)?;
    let record_store = SqliteRecordStore::new(&config.database_path, config.record_batch_size)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let state = AppState {
        schema: &USER_DATA_SCHEMA,
        limits: config.limits.clone(),
        byte_store: Arc::new(byte_store),
        record_store: Arc::new(record_store),
    };

    info!(
        "Storing uploads in {} and records in {}",
        config.storage_dir.display(),
        config.database_path.display()
    );
    info!(
        "Server running at http://{}:{} (upload limit {} bytes)",
        config.host, config.port, config.limits.max_upload_bytes
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .service(services::data_sources::csv::configure_routes())
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
