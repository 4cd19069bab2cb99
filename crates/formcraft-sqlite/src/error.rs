//! Error types for the SQLite form store.

use formcraft_core::StoreError;
use thiserror::Error;

/// SQLite store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A definition with this slug already exists.
    #[error("slug already exists: {0}")]
    SlugExists(String),

    /// Options column could not be encoded or decoded.
    #[error("invalid options column: {0}")]
    Options(#[from] serde_json::Error),

    /// A stored field names a type this build does not know.
    #[error("unknown stored field type: {0}")]
    UnknownFieldType(String),

    /// A stored field has an order outside the supported range.
    #[error("invalid stored field order: {0}")]
    InvalidOrder(i64),
}

impl From<SqliteStoreError> for StoreError {
    fn from(err: SqliteStoreError) -> Self {
        match err {
            SqliteStoreError::SlugExists(slug) => Self::UniqueViolation(slug),
            other => Self::backend(other),
        }
    }
}

/// Result type alias for SQLite store operations.
pub type Result<T> = std::result::Result<T, SqliteStoreError>;
