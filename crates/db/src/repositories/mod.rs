//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod closing;
pub mod error;
pub mod expense;
mod mapping;
pub mod plan;
pub mod report;

pub use closing::ClosingRepository;
pub use error::StoreError;
pub use expense::ExpenseRepository;
pub use plan::PlanRepository;
pub use report::ReportRepository;
