//! Error types raised by store implementations.

use thiserror::Error;

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("tournament store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("unique constraint violated on {table}: {key}")]
    UniqueViolation { table: &'static str, key: String },

    #[error("{table} references missing row {key}")]
    MissingReference { table: &'static str, key: String },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
