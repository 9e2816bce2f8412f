//! Core ledger logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `month` - Month keys and calendar arithmetic
//! - `expense` - Expense categories, input validation and records
//! - `plan` - Monthly income/savings plans
//! - `aggregation` - Month totals and category breakdowns
//! - `budget` - Spendable ceiling, remaining budget and daily allowance
//! - `closing` - Open/closed month state and snapshot construction
//! - `reports` - Summary, trend and monthly detail read models

pub mod aggregation;
pub mod budget;
pub mod closing;
pub mod error;
pub mod expense;
pub mod month;
pub mod plan;
pub mod reports;

pub use error::{LedgerError, ValidationError};
pub use month::MonthKey;
