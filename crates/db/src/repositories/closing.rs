//! Closing repository: the only writer of monthly snapshots.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tally_core::MonthKey;
use tally_core::closing::{ClosingService, MonthState, MonthlySnapshot};
use tally_shared::types::{Currency, SnapshotId, UserId};
use tracing::{info, warn};

use super::error::{StoreError, is_unique_violation};
use super::expense::ExpenseRepository;
use super::mapping::decode_all;
use crate::entities::monthly_snapshots;

/// Closing repository for month state and snapshots.
#[derive(Debug, Clone)]
pub struct ClosingRepository {
    db: DatabaseConnection,
}

impl ClosingRepository {
    /// Creates a new closing repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the closed snapshot for a month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the row does not decode.
    pub async fn find_closed(
        &self,
        user_id: UserId,
        month: MonthKey,
    ) -> Result<Option<MonthlySnapshot>, StoreError> {
        monthly_snapshots::Entity::find()
            .filter(monthly_snapshots::Column::UserId.eq(user_id.into_inner()))
            .filter(monthly_snapshots::Column::Month.eq(month.to_string()))
            .filter(monthly_snapshots::Column::IsClosed.eq(true))
            .one(&self.db)
            .await?
            .map(MonthlySnapshot::try_from)
            .transpose()
    }

    /// Lists all of a user's snapshots, newest month first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row does not decode.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<MonthlySnapshot>, StoreError> {
        let rows = monthly_snapshots::Entity::find()
            .filter(monthly_snapshots::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(monthly_snapshots::Column::Month)
            .all(&self.db)
            .await?;

        decode_all(rows)
    }

    /// Returns the lifecycle state of a month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn state(&self, user_id: UserId, month: MonthKey) -> Result<MonthState, StoreError> {
        let snapshot = self.find_closed(user_id, month).await?;
        Ok(ClosingService::state(snapshot.as_ref()))
    }

    /// Returns true if a closed snapshot exists for the month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn is_closed(&self, user_id: UserId, month: MonthKey) -> Result<bool, StoreError> {
        Ok(self.state(user_id, month).await? == MonthState::Closed)
    }

    /// Fails if the month is closed. Called before every expense or plan write.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MonthClosed` if the month is closed.
    pub async fn assert_editable(&self, user_id: UserId, month: MonthKey) -> Result<(), StoreError> {
        let state = self.state(user_id, month).await?;
        ClosingService::ensure_editable(month, state)?;
        Ok(())
    }

    /// Closes a month, freezing its current numbers.
    ///
    /// Idempotent: an already-closed month returns its existing snapshot.
    /// When two closes race, the unique index on (user, month) lets exactly one
    /// insert win and the loser returns the winner's snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails.
    pub async fn close(
        &self,
        user_id: UserId,
        month: MonthKey,
        currency: Currency,
    ) -> Result<MonthlySnapshot, StoreError> {
        if let Some(existing) = self.find_closed(user_id, month).await? {
            return Ok(existing);
        }

        let expenses = ExpenseRepository::new(self.db.clone())
            .list(user_id, Some(month))
            .await?;
        let draft = ClosingService::prepare(month, &expenses, currency);

        let breakdown = serde_json::to_value(&draft.stats.category_breakdown)
            .map_err(|e| StoreError::CorruptRecord(format!("unencodable breakdown: {e}")))?;
        let transaction_count = i32::try_from(draft.stats.transaction_count)
            .map_err(|_| StoreError::CorruptRecord("transaction count overflow".to_string()))?;

        let id = SnapshotId::new();
        let inserted = monthly_snapshots::ActiveModel {
            id: Set(id.into_inner()),
            user_id: Set(user_id.into_inner()),
            month: Set(month.to_string()),
            is_closed: Set(true),
            total_amount: Set(draft.stats.total_amount),
            transaction_count: Set(transaction_count),
            top_category: Set(draft.stats.top_category),
            category_breakdown: Set(breakdown),
            summary_text: Set(draft.summary_text),
            closed_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await;

        match inserted {
            Ok(row) => {
                info!(
                    user_id = %user_id,
                    month = %month,
                    snapshot_id = %id,
                    transactions = transaction_count,
                    "Month closed"
                );
                MonthlySnapshot::try_from(row)
            }
            Err(err) if is_unique_violation(&err) => {
                warn!(
                    user_id = %user_id,
                    month = %month,
                    "Concurrent close lost the race, returning existing snapshot"
                );
                self.find_closed(user_id, month)
                    .await?
                    .ok_or(StoreError::Database(err))
            }
            Err(err) => Err(err.into()),
        }
    }
}
