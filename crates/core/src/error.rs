//! Ledger error types.
//!
//! Validation failures are raised before any store mutation. State errors
//! (closed month, missing record) are raised by the ledger boundary.

use tally_shared::error::AppError;
use tally_shared::types::ExpenseId;
use thiserror::Error;

use crate::month::MonthKey;

/// Rejected input. The display text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    // ========== Expense Input ==========
    /// Title is shorter than 2 or longer than 80 characters after trimming.
    #[error("Title must be between 2 and 80 characters.")]
    InvalidTitle,

    /// Amount is missing, not a number, not positive or above 1,000,000.
    #[error("Amount must be a number greater than 0.")]
    InvalidAmount,

    /// Category is not one of the fixed labels.
    #[error("Please select a valid category.")]
    InvalidCategory,

    /// Date is not a real `YYYY-MM-DD` calendar date.
    #[error("Date must be in YYYY-MM-DD format.")]
    InvalidDate,

    /// Expense notes exceed 280 characters.
    #[error("Notes cannot exceed 280 characters.")]
    ExpenseNotesTooLong,

    // ========== Plan Input ==========
    /// Month key does not match `YYYY-MM`.
    #[error("month must be in YYYY-MM format.")]
    InvalidMonth,

    /// Income is missing, not positive or above 1,000,000,000.
    #[error("incomeAmount must be greater than 0.")]
    InvalidIncome,

    /// Savings target is negative, not a number or above 1,000,000,000.
    #[error("savingsTarget must be a number between 0 and 1,000,000,000.")]
    InvalidSavings,

    /// Savings target is larger than income.
    #[error("savingsTarget cannot be greater than incomeAmount.")]
    SavingsExceedIncome,

    /// Plan notes exceed 300 characters.
    #[error("notes cannot exceed 300 characters.")]
    PlanNotesTooLong,
}

impl ValidationError {
    /// Returns the input field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidTitle => "title",
            Self::InvalidAmount => "amount",
            Self::InvalidCategory => "category",
            Self::InvalidDate => "date",
            Self::ExpenseNotesTooLong | Self::PlanNotesTooLong => "notes",
            Self::InvalidMonth => "month",
            Self::InvalidIncome => "incomeAmount",
            Self::InvalidSavings | Self::SavingsExceedIncome => "savingsTarget",
        }
    }
}

/// Errors that can occur during ledger, plan and closing operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The month has a closed snapshot and can no longer be edited.
    #[error("{0} is closed and cannot be edited.")]
    MonthClosed(MonthKey),

    /// Expense is missing or owned by another user.
    #[error("Expense not found.")]
    ExpenseNotFound(ExpenseId),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MonthClosed(_) => "MONTH_CLOSED",
            Self::ExpenseNotFound(_) => "NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::Validation(_) => 400,

            // 404 Not Found - missing and foreign records look the same
            Self::ExpenseNotFound(_) => 404,

            // 423 Locked - closed months are read-only
            Self::MonthClosed(_) => 423,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::Validation(_) => Self::Validation(message),
            LedgerError::MonthClosed(_) => Self::Locked(message),
            LedgerError::ExpenseNotFound(_) => Self::NotFound(message),
        }
    }
}
