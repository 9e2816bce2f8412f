//! Monthly plan repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tally_core::MonthKey;
use tally_core::plan::{MonthlyPlan, MonthlyPlanInput, PlanDraft};
use tally_shared::types::{PlanId, UserId};
use tracing::info;

use super::closing::ClosingRepository;
use super::error::{StoreError, is_unique_violation};
use super::mapping::decode_all;
use crate::entities::monthly_plans;

/// Plan repository, one plan per user and month.
#[derive(Debug, Clone)]
pub struct PlanRepository {
    db: DatabaseConnection,
}

impl PlanRepository {
    /// Creates a new plan repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_row(
        &self,
        user_id: UserId,
        month: MonthKey,
    ) -> Result<Option<monthly_plans::Model>, StoreError> {
        Ok(monthly_plans::Entity::find()
            .filter(monthly_plans::Column::UserId.eq(user_id.into_inner()))
            .filter(monthly_plans::Column::Month.eq(month.to_string()))
            .one(&self.db)
            .await?)
    }

    /// Gets the plan for a month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the row does not decode.
    pub async fn get(
        &self,
        user_id: UserId,
        month: MonthKey,
    ) -> Result<Option<MonthlyPlan>, StoreError> {
        self.find_row(user_id, month)
            .await?
            .map(MonthlyPlan::try_from)
            .transpose()
    }

    /// Lists all of a user's plans, newest month first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row does not decode.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<MonthlyPlan>, StoreError> {
        let rows = monthly_plans::Entity::find()
            .filter(monthly_plans::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(monthly_plans::Column::Month)
            .all(&self.db)
            .await?;

        decode_all(rows)
    }

    /// Creates or replaces the plan for the input's month.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` for bad input and
    /// `LedgerError::MonthClosed` if the month is closed.
    pub async fn upsert(
        &self,
        user_id: UserId,
        input: &MonthlyPlanInput,
    ) -> Result<MonthlyPlan, StoreError> {
        let draft = input.validate()?;

        ClosingRepository::new(self.db.clone())
            .assert_editable(user_id, draft.month)
            .await?;

        let row = match self.find_row(user_id, draft.month).await? {
            Some(existing) => self.update_row(existing, &draft).await?,
            None => match self.insert_row(user_id, &draft).await {
                Ok(row) => row,
                // Another request inserted the plan first; update theirs.
                Err(StoreError::Database(err)) if is_unique_violation(&err) => {
                    let existing = self
                        .find_row(user_id, draft.month)
                        .await?
                        .ok_or(StoreError::Database(err))?;
                    self.update_row(existing, &draft).await?
                }
                Err(err) => return Err(err),
            },
        };

        info!(user_id = %user_id, month = %draft.month, "Monthly plan saved");
        MonthlyPlan::try_from(row)
    }

    async fn insert_row(
        &self,
        user_id: UserId,
        draft: &PlanDraft,
    ) -> Result<monthly_plans::Model, StoreError> {
        let now = Utc::now().fixed_offset();

        Ok(monthly_plans::ActiveModel {
            id: Set(PlanId::new().into_inner()),
            user_id: Set(user_id.into_inner()),
            month: Set(draft.month.to_string()),
            income_amount: Set(draft.income_amount),
            savings_target: Set(draft.savings_target),
            notes: Set(draft.notes.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?)
    }

    async fn update_row(
        &self,
        existing: monthly_plans::Model,
        draft: &PlanDraft,
    ) -> Result<monthly_plans::Model, StoreError> {
        let mut active: monthly_plans::ActiveModel = existing.into();
        active.income_amount = Set(draft.income_amount);
        active.savings_target = Set(draft.savings_target);
        active.notes = Set(draft.notes.clone());
        active.updated_at = Set(Utc::now().fixed_offset());

        Ok(active.update(&self.db).await?)
    }
}
