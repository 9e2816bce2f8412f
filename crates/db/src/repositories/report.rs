//! Report repository: summaries, trend and monthly detail.
//!
//! Each read fetches its independent collections concurrently and hands them
//! to the pure merge functions in `tally_core::reports`.

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tally_core::MonthKey;
use tally_core::reports::{
    MonthlyDetail, MonthlySummary, MonthlyTrendPoint, ReportService, TrendLimit,
};
use tally_shared::types::UserId;

use super::closing::ClosingRepository;
use super::error::StoreError;
use super::expense::ExpenseRepository;
use super::plan::PlanRepository;

/// Report repository for read views.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    expenses: ExpenseRepository,
    plans: PlanRepository,
    closing: ClosingRepository,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            expenses: ExpenseRepository::new(db.clone()),
            plans: PlanRepository::new(db.clone()),
            closing: ClosingRepository::new(db),
        }
    }

    /// One summary per month the user has touched, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub async fn list_summaries(&self, user_id: UserId) -> Result<Vec<MonthlySummary>, StoreError> {
        let (snapshots, expenses, plans) = tokio::try_join!(
            self.closing.list(user_id),
            self.expenses.list(user_id, None),
            self.plans.list(user_id),
        )?;

        Ok(ReportService::merge_summaries(&snapshots, &expenses, &plans))
    }

    /// The most recent `limit` months as trend points, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub async fn list_trend(
        &self,
        user_id: UserId,
        limit: TrendLimit,
    ) -> Result<Vec<MonthlyTrendPoint>, StoreError> {
        let (snapshots, expenses, plans) = tokio::try_join!(
            self.closing.list(user_id),
            self.expenses.list(user_id, None),
            self.plans.list(user_id),
        )?;

        let summaries = ReportService::merge_summaries(&snapshots, &expenses, &plans);
        Ok(ReportService::build_trend(&summaries, &plans, limit))
    }

    /// Everything needed to render one month.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub async fn monthly_detail(
        &self,
        user_id: UserId,
        month: MonthKey,
        today: NaiveDate,
    ) -> Result<MonthlyDetail, StoreError> {
        let (expenses, snapshot, plan) = tokio::try_join!(
            self.expenses.list(user_id, Some(month)),
            self.closing.find_closed(user_id, month),
            self.plans.get(user_id, month),
        )?;

        Ok(ReportService::monthly_detail(month, expenses, snapshot, plan, today))
    }
}
