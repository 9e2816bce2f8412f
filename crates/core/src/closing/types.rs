//! Snapshot and month state types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{SnapshotId, UserId};

use crate::aggregation::MonthStats;
use crate::month::MonthKey;

/// Lifecycle state of a (user, month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthState {
    /// No snapshot; expenses and plan are editable.
    Open,
    /// Snapshot exists; nothing in the month may change.
    Closed,
}

impl MonthState {
    /// Returns true if writes are allowed.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Frozen aggregate of a closed month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySnapshot {
    /// Unique identifier.
    pub id: SnapshotId,
    /// Owning user.
    pub user_id: UserId,
    /// Closed month.
    pub month: MonthKey,
    /// Always true for stored snapshots.
    pub is_closed: bool,
    /// Total spend at close time.
    pub total_amount: Decimal,
    /// Number of expenses at close time.
    pub transaction_count: u32,
    /// Top category label at close time.
    pub top_category: String,
    /// Category label to amount at close time.
    pub category_breakdown: BTreeMap<String, Decimal>,
    /// Sentence describing the month.
    pub summary_text: String,
    /// When the month was closed.
    pub closed_at: DateTime<Utc>,
}

/// A snapshot computed from live data, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDraft {
    /// Month being closed.
    pub month: MonthKey,
    /// Aggregated numbers.
    pub stats: MonthStats,
    /// Sentence describing the month.
    pub summary_text: String,
}
