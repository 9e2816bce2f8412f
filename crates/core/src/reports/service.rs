//! Summary, trend and detail assembly.
//!
//! Every function here is a pure reduction over collections the caller has
//! already fetched, so the precedence rules can be tested without storage.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::round_money;

use super::types::{
    MonthlyDetail, MonthlySummary, MonthlyTrendPoint, TOP_CATEGORY_PLACEHOLDER, TrendLimit,
};
use crate::aggregation::{MonthAggregator, MonthStats};
use crate::budget::BudgetService;
use crate::closing::MonthlySnapshot;
use crate::expense::ExpenseRecord;
use crate::month::MonthKey;
use crate::plan::MonthlyPlan;

/// Report service for business logic.
pub struct ReportService;

impl ReportService {
    /// Summary read verbatim from a snapshot.
    #[must_use]
    pub fn summary_from_snapshot(snapshot: &MonthlySnapshot) -> MonthlySummary {
        MonthlySummary {
            month: snapshot.month,
            total_amount: round_money(snapshot.total_amount),
            transaction_count: snapshot.transaction_count,
            top_category: snapshot.top_category.clone(),
            is_closed: snapshot.is_closed,
            closed_at: Some(snapshot.closed_at),
        }
    }

    /// Summary of an open month from live stats.
    #[must_use]
    pub fn summary_from_stats(month: MonthKey, stats: &MonthStats) -> MonthlySummary {
        MonthlySummary {
            month,
            total_amount: stats.total_amount,
            transaction_count: stats.transaction_count,
            top_category: stats.top_category.clone(),
            is_closed: false,
            closed_at: None,
        }
    }

    /// Zero-activity summary for a month that only has a plan.
    #[must_use]
    pub fn placeholder_summary(month: MonthKey) -> MonthlySummary {
        MonthlySummary {
            month,
            total_amount: round_money(Decimal::ZERO),
            transaction_count: 0,
            top_category: TOP_CATEGORY_PLACEHOLDER.to_string(),
            is_closed: false,
            closed_at: None,
        }
    }

    /// One summary per month the user has touched, newest first.
    ///
    /// Precedence per month: snapshot, then live expenses, then plan placeholder.
    /// Expenses of a month that has a snapshot are ignored.
    #[must_use]
    pub fn merge_summaries(
        snapshots: &[MonthlySnapshot],
        expenses: &[ExpenseRecord],
        plans: &[MonthlyPlan],
    ) -> Vec<MonthlySummary> {
        let frozen: BTreeMap<MonthKey, &MonthlySnapshot> =
            snapshots.iter().map(|s| (s.month, s)).collect();

        let mut live: BTreeMap<MonthKey, Vec<&ExpenseRecord>> = BTreeMap::new();
        for expense in expenses {
            live.entry(expense.month()).or_default().push(expense);
        }

        let months: BTreeSet<MonthKey> = frozen
            .keys()
            .chain(live.keys())
            .copied()
            .chain(plans.iter().map(|p| p.month))
            .collect();

        months
            .into_iter()
            .rev()
            .map(|month| {
                if let Some(snapshot) = frozen.get(&month) {
                    Self::summary_from_snapshot(snapshot)
                } else if let Some(records) = live.get(&month) {
                    let stats = MonthAggregator::aggregate_amounts(
                        records.iter().map(|e| (e.category, e.amount)),
                    );
                    Self::summary_from_stats(month, &stats)
                } else {
                    Self::placeholder_summary(month)
                }
            })
            .collect()
    }

    /// The most recent `limit` months as trend points, oldest first.
    ///
    /// Months come from the union of summaries and plans. A month without a
    /// summary counts as zero spend; a month without a plan as zero income.
    #[must_use]
    pub fn build_trend(
        summaries: &[MonthlySummary],
        plans: &[MonthlyPlan],
        limit: TrendLimit,
    ) -> Vec<MonthlyTrendPoint> {
        let summary_by_month: BTreeMap<MonthKey, &MonthlySummary> =
            summaries.iter().map(|s| (s.month, s)).collect();
        let plan_by_month: BTreeMap<MonthKey, &MonthlyPlan> =
            plans.iter().map(|p| (p.month, p)).collect();

        let months: BTreeSet<MonthKey> = summary_by_month
            .keys()
            .chain(plan_by_month.keys())
            .copied()
            .collect();

        let mut points: Vec<MonthlyTrendPoint> = months
            .into_iter()
            .rev()
            .take(limit.get())
            .map(|month| {
                let summary = summary_by_month.get(&month);
                let plan = plan_by_month.get(&month);

                let expense_total = summary.map_or(Decimal::ZERO, |s| s.total_amount);
                let income_amount = plan.map_or(Decimal::ZERO, |p| p.income_amount);
                let savings_target = plan.map_or(Decimal::ZERO, |p| p.savings_target);
                let planned_spendable = BudgetService::planned_spendable(income_amount, savings_target);

                MonthlyTrendPoint {
                    month,
                    expense_total: round_money(expense_total),
                    income_amount: round_money(income_amount),
                    savings_target: round_money(savings_target),
                    planned_spendable,
                    remaining_budget: round_money(planned_spendable - expense_total),
                    is_closed: summary.is_some_and(|s| s.is_closed),
                }
            })
            .collect();

        points.reverse();
        points
    }

    /// Assembles the detail view of one month.
    ///
    /// A closed month reports its snapshot verbatim; an open month is
    /// aggregated from `expenses`. Budget insights are always recomputed.
    #[must_use]
    pub fn monthly_detail(
        month: MonthKey,
        expenses: Vec<ExpenseRecord>,
        snapshot: Option<MonthlySnapshot>,
        plan: Option<MonthlyPlan>,
        today: NaiveDate,
    ) -> MonthlyDetail {
        let (summary, category_breakdown, summary_text) = match snapshot {
            Some(snapshot) => (
                Self::summary_from_snapshot(&snapshot),
                snapshot.category_breakdown,
                snapshot.summary_text,
            ),
            None => {
                let stats = MonthAggregator::aggregate(&expenses);
                (
                    Self::summary_from_stats(month, &stats),
                    stats.category_breakdown,
                    String::new(),
                )
            }
        };

        let budget = BudgetService::insights(month, summary.total_amount, plan.as_ref(), today);

        MonthlyDetail {
            summary,
            plan,
            budget,
            category_breakdown,
            summary_text,
            expenses,
        }
    }
}
