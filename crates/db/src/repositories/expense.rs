//! Expense ledger repository.
//!
//! Every write checks the closing state of the month(s) it touches before
//! changing anything.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tally_core::LedgerError;
use tally_core::MonthKey;
use tally_core::expense::{ExpenseInput, ExpenseRecord};
use tally_shared::types::{ExpenseId, UserId};
use tracing::info;

use super::closing::ClosingRepository;
use super::error::StoreError;
use super::mapping::decode_all;
use crate::entities::expenses;

/// Expense repository for ledger operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn closing(&self) -> ClosingRepository {
        ClosingRepository::new(self.db.clone())
    }

    /// Lists a user's expenses, newest date first, then newest entry first.
    ///
    /// With `month`, only dates in `[first_day, next_month_start)` are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row does not decode.
    pub async fn list(
        &self,
        user_id: UserId,
        month: Option<MonthKey>,
    ) -> Result<Vec<ExpenseRecord>, StoreError> {
        let mut query =
            expenses::Entity::find().filter(expenses::Column::UserId.eq(user_id.into_inner()));

        if let Some(month) = month {
            query = query
                .filter(expenses::Column::Date.gte(month.first_day()))
                .filter(expenses::Column::Date.lt(month.next_month_start()));
        }

        let rows = query
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.db)
            .await?;

        decode_all(rows)
    }

    /// Finds an expense owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        user_id: UserId,
        expense_id: ExpenseId,
    ) -> Result<Option<ExpenseRecord>, StoreError> {
        self.find_row(user_id, expense_id)
            .await?
            .map(ExpenseRecord::try_from)
            .transpose()
    }

    async fn find_row(
        &self,
        user_id: UserId,
        expense_id: ExpenseId,
    ) -> Result<Option<expenses::Model>, StoreError> {
        Ok(expenses::Entity::find_by_id(expense_id.into_inner())
            .filter(expenses::Column::UserId.eq(user_id.into_inner()))
            .one(&self.db)
            .await?)
    }

    /// Records a new expense.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` for bad input and
    /// `LedgerError::MonthClosed` if the expense's month is closed.
    pub async fn create(
        &self,
        user_id: UserId,
        input: &ExpenseInput,
    ) -> Result<ExpenseRecord, StoreError> {
        let draft = input.validate()?;
        let month = draft.month();

        self.closing().assert_editable(user_id, month).await?;

        let id = ExpenseId::new();
        let row = expenses::ActiveModel {
            id: Set(id.into_inner()),
            user_id: Set(user_id.into_inner()),
            title: Set(draft.title),
            amount: Set(draft.amount),
            category: Set(draft.category.as_str().to_string()),
            date: Set(draft.date),
            notes: Set(draft.notes),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await?;

        info!(user_id = %user_id, expense_id = %id, month = %month, "Expense created");
        ExpenseRecord::try_from(row)
    }

    /// Replaces an expense's fields.
    ///
    /// Both the current month and, if the date moves, the target month must be open.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ExpenseNotFound` when the expense is missing or
    /// belongs to someone else, `LedgerError::MonthClosed` if either month is
    /// closed, and `LedgerError::Validation` for bad input.
    pub async fn update(
        &self,
        user_id: UserId,
        expense_id: ExpenseId,
        input: &ExpenseInput,
    ) -> Result<ExpenseRecord, StoreError> {
        let draft = input.validate()?;

        let existing = self
            .find_row(user_id, expense_id)
            .await?
            .ok_or(LedgerError::ExpenseNotFound(expense_id))?;

        let from_month = MonthKey::from_date(existing.date);
        let to_month = draft.month();

        let closing = self.closing();
        closing.assert_editable(user_id, from_month).await?;
        if to_month != from_month {
            closing.assert_editable(user_id, to_month).await?;
        }

        let mut active: expenses::ActiveModel = existing.into();
        active.title = Set(draft.title);
        active.amount = Set(draft.amount);
        active.category = Set(draft.category.as_str().to_string());
        active.date = Set(draft.date);
        active.notes = Set(draft.notes);

        let row = active.update(&self.db).await?;

        info!(
            user_id = %user_id,
            expense_id = %expense_id,
            month = %to_month,
            "Expense updated"
        );
        ExpenseRecord::try_from(row)
    }

    /// Deletes an expense.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ExpenseNotFound` when the expense is missing or
    /// belongs to someone else, and `LedgerError::MonthClosed` if its month is closed.
    pub async fn delete(&self, user_id: UserId, expense_id: ExpenseId) -> Result<(), StoreError> {
        let existing = self
            .find_row(user_id, expense_id)
            .await?
            .ok_or(LedgerError::ExpenseNotFound(expense_id))?;

        let month = MonthKey::from_date(existing.date);
        self.closing().assert_editable(user_id, month).await?;

        expenses::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;

        info!(user_id = %user_id, expense_id = %expense_id, month = %month, "Expense deleted");
        Ok(())
    }
}
