use thiserror::Error;

use crate::domain::validation::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse lounge JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to convert snapshot record: {0}")]
    SnapshotConversionError(String),

    #[error("Invalid lounge configuration: {0}")]
    InvalidConfigError(String),

    #[error("Rejected: {0}")]
    ValidationError(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, Error>;
