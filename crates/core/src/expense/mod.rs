//! Expense categories, input validation and records.

pub mod category;
pub mod input;
pub mod types;

pub use category::Category;
pub use input::{AmountInput, ExpenseDraft, ExpenseInput};
pub use types::ExpenseRecord;
