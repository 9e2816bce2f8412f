//! Integration tests for monthly plans.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_core::{LedgerError, ValidationError};
use tally_db::{ClosingRepository, PlanRepository, StoreError};
use tally_shared::types::{Currency, UserId};

use common::{add_plan, month, plan_input, setup};

#[tokio::test]
async fn test_upsert_inserts_then_updates() {
    let db = setup().await;
    let user = UserId::new();
    let repo = PlanRepository::new(db.clone());

    let created = add_plan(&db, user, "2025-01", dec!(3000), dec!(500)).await;
    assert_eq!(created.income_amount, dec!(3000.00));
    assert_eq!(created.savings_target, dec!(500.00));

    let updated = add_plan(&db, user, "2025-01", dec!(3200.456), dec!(800)).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.income_amount, dec!(3200.46));
    assert_eq!(updated.savings_target, dec!(800.00));

    let plans = repo.list(user).await.unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(
        repo.get(user, month("2025-01")).await.unwrap().unwrap().id,
        created.id
    );
}

#[tokio::test]
async fn test_list_newest_month_first() {
    let db = setup().await;
    let user = UserId::new();

    add_plan(&db, user, "2024-12", dec!(1000), Decimal::ZERO).await;
    add_plan(&db, user, "2025-02", dec!(1000), Decimal::ZERO).await;
    add_plan(&db, user, "2025-01", dec!(1000), Decimal::ZERO).await;

    let months: Vec<String> = PlanRepository::new(db)
        .list(user)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.month.to_string())
        .collect();

    assert_eq!(months, ["2025-02", "2025-01", "2024-12"]);
}

#[tokio::test]
async fn test_missing_savings_defaults_to_zero() {
    let db = setup().await;
    let user = UserId::new();
    let mut input = plan_input("2025-03", dec!(2500), Decimal::ZERO);
    input.savings_target = None;

    let plan = PlanRepository::new(db).upsert(user, &input).await.unwrap();

    assert_eq!(plan.savings_target, Decimal::ZERO);
}

#[tokio::test]
async fn test_savings_above_income_rejected() {
    let db = setup().await;
    let user = UserId::new();
    let repo = PlanRepository::new(db);

    let result = repo
        .upsert(user, &plan_input("2025-03", dec!(1000), dec!(1000.01)))
        .await;

    assert!(matches!(
        result,
        Err(StoreError::Ledger(LedgerError::Validation(
            ValidationError::SavingsExceedIncome
        )))
    ));
    assert!(repo.get(user, month("2025-03")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_closed_month_plan_is_frozen() {
    let db = setup().await;
    let user = UserId::new();
    let repo = PlanRepository::new(db.clone());

    add_plan(&db, user, "2025-01", dec!(3000), dec!(500)).await;
    ClosingRepository::new(db.clone())
        .close(user, month("2025-01"), Currency::Usd)
        .await
        .unwrap();

    let result = repo
        .upsert(user, &plan_input("2025-01", dec!(9999), Decimal::ZERO))
        .await;
    assert!(matches!(
        result,
        Err(StoreError::Ledger(LedgerError::MonthClosed(_)))
    ));

    let stored = repo.get(user, month("2025-01")).await.unwrap().unwrap();
    assert_eq!(stored.income_amount, dec!(3000.00));

    // A closed month with no plan cannot gain one either.
    ClosingRepository::new(db.clone())
        .close(user, month("2025-02"), Currency::Usd)
        .await
        .unwrap();
    let late = repo
        .upsert(user, &plan_input("2025-02", dec!(100), Decimal::ZERO))
        .await;
    assert!(matches!(
        late,
        Err(StoreError::Ledger(LedgerError::MonthClosed(_)))
    ));
}

#[tokio::test]
async fn test_plans_are_per_user() {
    let db = setup().await;
    let alice = UserId::new();
    let bob = UserId::new();

    add_plan(&db, alice, "2025-01", dec!(3000), Decimal::ZERO).await;
    add_plan(&db, bob, "2025-01", dec!(1500), Decimal::ZERO).await;

    let repo = PlanRepository::new(db);
    assert_eq!(
        repo.get(alice, month("2025-01")).await.unwrap().unwrap().income_amount,
        dec!(3000.00)
    );
    assert_eq!(
        repo.get(bob, month("2025-01")).await.unwrap().unwrap().income_amount,
        dec!(1500.00)
    );
}
