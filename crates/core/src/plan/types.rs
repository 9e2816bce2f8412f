//! Persisted plan record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{PlanId, UserId};

use crate::month::MonthKey;

/// Income and savings target for one (user, month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPlan {
    /// Unique identifier.
    pub id: PlanId,
    /// Owning user.
    pub user_id: UserId,
    /// Planned month.
    pub month: MonthKey,
    /// Expected income.
    pub income_amount: Decimal,
    /// Amount set aside, never above income.
    pub savings_target: Decimal,
    /// Free text, may be empty.
    pub notes: String,
    /// When the plan was first saved.
    pub created_at: DateTime<Utc>,
    /// When the plan was last saved.
    pub updated_at: DateTime<Utc>,
}
