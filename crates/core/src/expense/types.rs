//! Persisted expense record.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{ExpenseId, UserId};

use super::category::Category;
use crate::month::MonthKey;

/// A single expense owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// Unique identifier.
    pub id: ExpenseId,
    /// Owning user.
    pub user_id: UserId,
    /// Short description.
    pub title: String,
    /// Amount with two decimal places.
    pub amount: Decimal,
    /// Category.
    pub category: Category,
    /// Calendar date of the spend.
    pub date: NaiveDate,
    /// Free text, may be empty.
    pub notes: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl ExpenseRecord {
    /// The month this expense is booked into.
    #[must_use]
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}
