//! Monthly income and savings plans.

pub mod input;
pub mod types;

pub use input::{MonthlyPlanInput, PlanDraft};
pub use types::MonthlyPlan;
