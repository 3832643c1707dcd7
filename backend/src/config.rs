//! Runtime configuration, read from the environment (and `.env`, loaded in `main`).

use crate::ingest::IngestLimits;
use crate::storage::record_store::DEFAULT_BATCH_SIZE;
use log::warn;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub limits: IngestLimits,
    /// Directory the byte store writes uploads into.
    pub storage_dir: PathBuf,
    /// SQLite file backing the record store.
    pub database_path: PathBuf,
    pub record_batch_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = IngestLimits::default();
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080),
            limits: IngestLimits {
                max_upload_bytes: parse_or(
                    &lookup,
                    "CSV_MAX_UPLOAD_BYTES",
                    defaults.max_upload_bytes,
                ),
                preview_rows: parse_or(&lookup, "CSV_PREVIEW_ROWS", defaults.preview_rows),
                max_reported_errors: parse_or(
                    &lookup,
                    "CSV_MAX_REPORTED_ERRORS",
                    defaults.max_reported_errors,
                ),
            },
            storage_dir: lookup("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./uploads")),
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./user_data.sqlite")),
            record_batch_size: parse_or(&lookup, "RECORD_BATCH_SIZE", DEFAULT_BATCH_SIZE),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}; using the default", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.limits, IngestLimits::default());
        assert_eq!(config.limits.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.storage_dir, PathBuf::from("./uploads"));
        assert_eq!(config.record_batch_size, 25);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "9000"),
            ("CSV_MAX_UPLOAD_BYTES", "1024"),
            ("CSV_PREVIEW_ROWS", " 3 "),
            ("DATABASE_PATH", "/tmp/records.sqlite"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.limits.max_upload_bytes, 1024);
        assert_eq!(config.limits.preview_rows, 3);
        assert_eq!(config.database_path, PathBuf::from("/tmp/records.sqlite"));
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config(&[("PORT", "http"), ("RECORD_BATCH_SIZE", "-4")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.record_batch_size, 25);
    }
}
