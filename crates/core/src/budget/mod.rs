//! Budget insights: spendable ceiling, remaining budget and daily allowance.

pub mod service;
pub mod types;


pub use service::BudgetService;
pub use types::BudgetInsights;
