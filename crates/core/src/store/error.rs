//! Storage port error types.

use thiserror::Error;

use feedesk_shared::AppError;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("duplicate record: {0}")]
    Duplicate(String),

    /// The backing store failed.
    #[error("database error: {0}")]
    Database(String),

    /// A stored row could not be mapped to a domain record.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(_) => Self::Conflict(e.to_string()),
            StoreError::Database(_) | StoreError::InvalidRecord(_) => Self::Database(e.to_string()),
        }
    }
}
