//! Plan input and its validation.

use rust_decimal::Decimal;
use serde::Deserialize;
use tally_shared::types::round_money;

use crate::error::ValidationError;
use crate::expense::AmountInput;
use crate::month::MonthKey;

/// Upper bound for income and savings targets.
pub const MAX_PLAN_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Maximum characters in plan notes.
pub const MAX_PLAN_NOTES: usize = 300;

/// Unvalidated plan fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPlanInput {
    /// Month key, `YYYY-MM`.
    #[serde(default)]
    pub month: Option<String>,
    /// Expected income.
    #[serde(default)]
    pub income_amount: Option<AmountInput>,
    /// Savings target; absent means zero.
    #[serde(default)]
    pub savings_target: Option<AmountInput>,
    /// Optional free text.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A validated plan, ready to upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDraft {
    /// Planned month.
    pub month: MonthKey,
    /// Income rounded to 2 decimal places.
    pub income_amount: Decimal,
    /// Savings target rounded to 2 decimal places.
    pub savings_target: Decimal,
    /// Trimmed notes.
    pub notes: String,
}

impl MonthlyPlanInput {
    /// Validates the input.
    ///
    /// Savings is compared with income after both are rounded.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<PlanDraft, ValidationError> {
        let month: MonthKey = self.month.as_deref().unwrap_or_default().parse()?;

        let income_amount = self
            .income_amount
            .as_ref()
            .and_then(AmountInput::value)
            .filter(|value| *value > Decimal::ZERO && *value <= MAX_PLAN_AMOUNT)
            .map(round_money)
            .filter(|value| *value > Decimal::ZERO)
            .ok_or(ValidationError::InvalidIncome)?;

        let savings_target = match self.savings_target.as_ref() {
            None => Decimal::ZERO,
            Some(raw) if raw.is_blank() => Decimal::ZERO,
            Some(raw) => raw
                .value()
                .filter(|value| *value >= Decimal::ZERO && *value <= MAX_PLAN_AMOUNT)
                .ok_or(ValidationError::InvalidSavings)?,
        };
        let savings_target = round_money(savings_target);

        if savings_target > income_amount {
            return Err(ValidationError::SavingsExceedIncome);
        }

        let notes = self.notes.as_deref().unwrap_or_default().trim();
        if notes.chars().count() > MAX_PLAN_NOTES {
            return Err(ValidationError::PlanNotesTooLong);
        }

        Ok(PlanDraft {
            month,
            income_amount,
            savings_target,
            notes: notes.to_string(),
        })
    }
}
