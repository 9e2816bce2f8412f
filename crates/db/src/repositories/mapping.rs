//! Row to domain conversions.
//!
//! SQLite hands decimals back as floats, so every amount is re-rounded on read.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tally_core::MonthKey;
use tally_core::closing::MonthlySnapshot;
use tally_core::expense::{Category, ExpenseRecord};
use tally_core::plan::MonthlyPlan;
use tally_shared::types::{ExpenseId, PlanId, SnapshotId, UserId, round_money};

use super::error::StoreError;
use crate::entities::{expenses, monthly_plans, monthly_snapshots};

pub(crate) fn parse_month(raw: &str) -> Result<MonthKey, StoreError> {
    raw.parse()
        .map_err(|_| StoreError::CorruptRecord(format!("invalid month key: {raw}")))
}

impl TryFrom<expenses::Model> for ExpenseRecord {
    type Error = StoreError;

    fn try_from(model: expenses::Model) -> Result<Self, Self::Error> {
        let category: Category = model.category.parse().map_err(|_| {
            StoreError::CorruptRecord(format!("unknown category: {}", model.category))
        })?;

        Ok(Self {
            id: ExpenseId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            title: model.title,
            amount: round_money(model.amount),
            category,
            date: model.date,
            notes: model.notes,
            created_at: model.created_at.to_utc(),
        })
    }
}

impl TryFrom<monthly_plans::Model> for MonthlyPlan {
    type Error = StoreError;

    fn try_from(model: monthly_plans::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PlanId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            month: parse_month(&model.month)?,
            income_amount: round_money(model.income_amount),
            savings_target: round_money(model.savings_target),
            notes: model.notes,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        })
    }
}

impl TryFrom<monthly_snapshots::Model> for MonthlySnapshot {
    type Error = StoreError;

    fn try_from(model: monthly_snapshots::Model) -> Result<Self, Self::Error> {
        let breakdown: BTreeMap<String, Decimal> =
            serde_json::from_value(model.category_breakdown).map_err(|e| {
                StoreError::CorruptRecord(format!("invalid category breakdown: {e}"))
            })?;
        let transaction_count = u32::try_from(model.transaction_count).map_err(|_| {
            StoreError::CorruptRecord(format!(
                "negative transaction count: {}",
                model.transaction_count
            ))
        })?;

        Ok(Self {
            id: SnapshotId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            month: parse_month(&model.month)?,
            is_closed: model.is_closed,
            total_amount: round_money(model.total_amount),
            transaction_count,
            top_category: model.top_category,
            category_breakdown: breakdown
                .into_iter()
                .map(|(label, amount)| (label, round_money(amount)))
                .collect(),
            summary_text: model.summary_text,
            closed_at: model.closed_at.to_utc(),
        })
    }
}

/// Decodes a batch of rows, failing on the first corrupt one.
pub(crate) fn decode_all<M, T>(models: Vec<M>) -> Result<Vec<T>, StoreError>
where
    T: TryFrom<M, Error = StoreError>,
{
    models.into_iter().map(T::try_from).collect()
}
