//! Pure aggregation over a month's expenses.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::round_money;

use crate::expense::{Category, ExpenseRecord};

/// Top category label for a month without expenses.
pub const TOP_CATEGORY_NONE: &str = "None";

/// Aggregated numbers for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    /// Sum of all amounts.
    pub total_amount: Decimal,
    /// Number of expenses.
    pub transaction_count: u32,
    /// Category with the largest total, or [`TOP_CATEGORY_NONE`].
    pub top_category: String,
    /// Category label to summed amount.
    pub category_breakdown: BTreeMap<String, Decimal>,
}

impl MonthStats {
    /// Stats for a month with no expenses.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_amount: round_money(Decimal::ZERO),
            transaction_count: 0,
            top_category: TOP_CATEGORY_NONE.to_string(),
            category_breakdown: BTreeMap::new(),
        }
    }
}

/// Month aggregator.
pub struct MonthAggregator;

impl MonthAggregator {
    /// Aggregates a month's expense records.
    #[must_use]
    pub fn aggregate(expenses: &[ExpenseRecord]) -> MonthStats {
        Self::aggregate_amounts(expenses.iter().map(|e| (e.category, e.amount)))
    }

    /// Aggregates `(category, amount)` pairs.
    ///
    /// The top category is the one with the largest summed amount. Equal sums
    /// resolve to the lexically smallest label, so the result never depends on
    /// input order.
    #[must_use]
    pub fn aggregate_amounts<I>(amounts: I) -> MonthStats
    where
        I: IntoIterator<Item = (Category, Decimal)>,
    {
        let mut grouped: BTreeMap<&'static str, Decimal> = BTreeMap::new();
        let mut total = Decimal::ZERO;
        let mut count: u32 = 0;

        for (category, amount) in amounts {
            total += amount;
            count = count.saturating_add(1);
            *grouped.entry(category.as_str()).or_insert(Decimal::ZERO) += amount;
        }

        if count == 0 {
            return MonthStats::empty();
        }

        // BTreeMap iterates labels ascending; keep the first maximum.
        let top_category = grouped
            .iter()
            .fold(None::<(&str, Decimal)>, |best, (label, amount)| match best {
                Some((_, best_amount)) if best_amount >= *amount => best,
                _ => Some((*label, *amount)),
            })
            .map_or(TOP_CATEGORY_NONE, |(label, _)| label)
            .to_string();

        MonthStats {
            total_amount: round_money(total),
            transaction_count: count,
            top_category,
            category_breakdown: grouped
                .into_iter()
                .map(|(label, amount)| (label.to_string(), round_money(amount)))
                .collect(),
        }
    }
}
