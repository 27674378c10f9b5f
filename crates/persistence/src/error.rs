//! Persistence error type

use thiserror::Error;

/// Errors from the record and case stores
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<PersistenceError> for concierge_core::Error {
    fn from(err: PersistenceError) -> Self {
        concierge_core::Error::Persistence(err.to_string())
    }
}
