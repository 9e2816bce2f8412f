//! Shared helpers for repository integration tests.
//!
//! Each test gets its own in-memory SQLite database with the schema applied.

#![allow(dead_code)]

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tally_core::MonthKey;
use tally_core::expense::{ExpenseInput, ExpenseRecord};
use tally_core::plan::{MonthlyPlan, MonthlyPlanInput};
use tally_db::migration::{Migrator, MigratorTrait};
use tally_db::{ExpenseRepository, PlanRepository};
use tally_shared::types::UserId;

/// Connects to a fresh in-memory database and runs all migrations.
///
/// The pool holds a single connection; every connection to `sqlite::memory:`
/// is a separate database.
pub async fn setup() -> DatabaseConnection {
    let db = tally_db::connect_with_pool("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn month(s: &str) -> MonthKey {
    s.parse().expect("valid month key")
}

pub fn expense_input(title: &str, amount: Decimal, category: &str, date: &str) -> ExpenseInput {
    ExpenseInput {
        title: Some(title.to_string()),
        amount: Some(amount.into()),
        category: Some(category.to_string()),
        date: Some(date.to_string()),
        notes: None,
    }
}

pub fn plan_input(key: &str, income: Decimal, savings: Decimal) -> MonthlyPlanInput {
    MonthlyPlanInput {
        month: Some(key.to_string()),
        income_amount: Some(income.into()),
        savings_target: Some(savings.into()),
        notes: None,
    }
}

pub async fn add_expense(
    db: &DatabaseConnection,
    user_id: UserId,
    title: &str,
    amount: Decimal,
    category: &str,
    date: &str,
) -> ExpenseRecord {
    ExpenseRepository::new(db.clone())
        .create(user_id, &expense_input(title, amount, category, date))
        .await
        .expect("Failed to create expense")
}

pub async fn add_plan(
    db: &DatabaseConnection,
    user_id: UserId,
    key: &str,
    income: Decimal,
    savings: Decimal,
) -> MonthlyPlan {
    PlanRepository::new(db.clone())
        .upsert(user_id, &plan_input(key, income, savings))
        .await
        .expect("Failed to save plan")
}
