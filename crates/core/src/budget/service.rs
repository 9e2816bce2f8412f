//! Budget insight calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::round_money;

use super::types::BudgetInsights;
use crate::month::MonthKey;
use crate::plan::MonthlyPlan;

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Income left after the savings target, floored at zero.
    #[must_use]
    pub fn planned_spendable(income: Decimal, savings_target: Decimal) -> Decimal {
        round_money((income - savings_target).max(Decimal::ZERO))
    }

    /// Computes the insights for `month` given what was spent and the plan.
    ///
    /// Without a plan (or with non-positive income) every money field is zero and
    /// `income_required` is set; `days_remaining` is still reported.
    ///
    /// With a plan:
    /// - `planned_spendable = max(0, income - savings)`
    /// - `remaining_budget = planned_spendable - total`
    /// - `daily_allowance = remaining_budget / days_remaining`, or the whole
    ///   remaining budget once no days are left
    #[must_use]
    pub fn insights(
        month: MonthKey,
        total: Decimal,
        plan: Option<&MonthlyPlan>,
        today: NaiveDate,
    ) -> BudgetInsights {
        let days_remaining = month.days_remaining(today);

        let Some(plan) = plan.filter(|p| p.income_amount > Decimal::ZERO) else {
            return BudgetInsights {
                planned_spendable: round_money(Decimal::ZERO),
                remaining_budget: round_money(Decimal::ZERO),
                days_remaining,
                daily_allowance: round_money(Decimal::ZERO),
                income_required: true,
            };
        };

        let planned_spendable = Self::planned_spendable(plan.income_amount, plan.savings_target);
        let remaining_budget = round_money(planned_spendable - total);
        let daily_allowance = if days_remaining > 0 {
            round_money(remaining_budget / Decimal::from(days_remaining))
        } else {
            remaining_budget
        };

        BudgetInsights {
            planned_spendable,
            remaining_budget,
            days_remaining,
            daily_allowance,
            income_required: false,
        }
    }
}
