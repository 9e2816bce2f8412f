//! Report data types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::BudgetInsights;
use crate::expense::ExpenseRecord;
use crate::month::MonthKey;
use crate::plan::MonthlyPlan;

/// Top category label for a month that only has a plan.
pub const TOP_CATEGORY_PLACEHOLDER: &str = "No expenses yet";

/// One month in the history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Month.
    pub month: MonthKey,
    /// Total spend.
    pub total_amount: Decimal,
    /// Number of expenses.
    pub transaction_count: u32,
    /// Top category label.
    pub top_category: String,
    /// Whether the numbers come from a snapshot.
    pub is_closed: bool,
    /// Close time for closed months.
    pub closed_at: Option<DateTime<Utc>>,
}

/// One month in the trend view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendPoint {
    /// Month.
    pub month: MonthKey,
    /// Total spend, zero when the month only has a plan.
    pub expense_total: Decimal,
    /// Planned income, zero without a plan.
    pub income_amount: Decimal,
    /// Planned savings, zero without a plan.
    pub savings_target: Decimal,
    /// Income minus savings, floored at zero.
    pub planned_spendable: Decimal,
    /// Spendable minus spend.
    pub remaining_budget: Decimal,
    /// Whether the month is closed.
    pub is_closed: bool,
}

/// Everything needed to render one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDetail {
    /// Month summary.
    pub summary: MonthlySummary,
    /// The month's plan, if any.
    pub plan: Option<MonthlyPlan>,
    /// Budget insights computed from the summary total.
    pub budget: BudgetInsights,
    /// Category label to amount.
    pub category_breakdown: BTreeMap<String, Decimal>,
    /// Snapshot sentence; empty while the month is open.
    pub summary_text: String,
    /// The month's expenses in ledger order.
    pub expenses: Vec<ExpenseRecord>,
}

/// Number of months in a trend window, always within `3..=24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendLimit(usize);

impl TrendLimit {
    /// Smallest window.
    pub const MIN: usize = 3;
    /// Largest window.
    pub const MAX: usize = 24;
    /// Window used when none is requested.
    pub const DEFAULT: usize = 8;

    /// Clamps a requested window into range.
    #[must_use]
    pub fn new(requested: i64) -> Self {
        let requested = usize::try_from(requested.max(0)).unwrap_or(Self::MAX);
        Self(requested.clamp(Self::MIN, Self::MAX))
    }

    /// Parses a query value from its leading integer, so `"6.9"` and `"6d"`
    /// both mean 6. A value without leading digits means the default.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return Self::default();
        };
        let (negative, rest) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Self::default();
        }

        let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
        Self::new(if negative { -magnitude } else { magnitude })
    }

    /// The window length.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for TrendLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
