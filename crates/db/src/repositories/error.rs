//! Storage error type shared by all repositories.

use sea_orm::{DbErr, SqlErr};
use tally_core::{LedgerError, ValidationError};
use tally_shared::error::AppError;
use thiserror::Error;

/// Error types for ledger storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Domain rule violated (validation, closed month, not found).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// A stored row no longer decodes into a domain value.
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        Self::Ledger(err.into())
    }
}

/// Returns true if `err` was raised by a unique index.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Ledger(e) => e.into(),
            StoreError::Database(e) => Self::Database(e.to_string()),
            StoreError::CorruptRecord(msg) => Self::Internal(msg),
        }
    }
}
