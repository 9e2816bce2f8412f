//! Budget insight types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived budget numbers for one month. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInsights {
    /// Income minus savings target, floored at zero.
    pub planned_spendable: Decimal,
    /// Spendable minus spent. Negative when overspent.
    pub remaining_budget: Decimal,
    /// Days left in the month, today included.
    pub days_remaining: u32,
    /// Remaining budget spread over the days left.
    pub daily_allowance: Decimal,
    /// True when the month has no usable plan.
    pub income_required: bool,
}
