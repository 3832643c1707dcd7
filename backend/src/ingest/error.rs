use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

/// Terminal failures of the ingestion pipeline. Each one stops the current request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// Wrong file extension or content type.
    #[error("{0}")]
    Type(String),

    /// Upload larger than the configured limit; raised before any parsing.
    #[error("File size exceeds {:.2}MB limit (current: {:.2}MB)", as_mb(.limit), as_mb(.actual))]
    Size { actual: usize, limit: usize },

    /// Undecodable bytes or a structurally unusable CSV.
    #[error("{0}")]
    Format(String),

    /// None of the header columns is part of the schema.
    #[error("{0}")]
    Schema(String),
}

impl IngestError {
    /// Stable kind name surfaced in the `error` field of error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::Type(_) => "TypeError",
            IngestError::Size { .. } => "SizeError",
            IngestError::Format(_) => "FormatError",
            IngestError::Schema(_) => "SchemaError",
        }
    }
}

fn as_mb(bytes: &usize) -> f64 {
    *bytes as f64 / (1024.0 * 1024.0)
}
