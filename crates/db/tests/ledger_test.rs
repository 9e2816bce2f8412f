//! Integration tests for the expense ledger.

mod common;

use std::time::Duration;

use rust_decimal_macros::dec;
use tally_core::LedgerError;
use tally_core::expense::Category;
use tally_db::{ClosingRepository, ExpenseRepository, StoreError};
use tally_shared::types::{Currency, ExpenseId, UserId};

use common::{add_expense, expense_input, month, setup};

#[tokio::test]
async fn test_create_and_list_by_month() {
    let db = setup().await;
    let user = UserId::new();
    let repo = ExpenseRepository::new(db.clone());

    add_expense(&db, user, "Rent", dec!(900), "Housing", "2025-01-01").await;
    add_expense(&db, user, "Dinner", dec!(35.5), "Food", "2025-01-31").await;
    add_expense(&db, user, "Train", dec!(4.2), "Transportation", "2025-02-01").await;

    let january = repo.list(user, Some(month("2025-01"))).await.unwrap();
    assert_eq!(january.len(), 2);
    assert_eq!(january[0].title, "Dinner");
    assert_eq!(january[0].amount.to_string(), "35.50");
    assert_eq!(january[1].category, Category::Housing);

    let all = repo.list(user, None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].title, "Train");
}

#[tokio::test]
async fn test_same_day_entries_newest_first() {
    let db = setup().await;
    let user = UserId::new();

    let first = add_expense(&db, user, "Coffee", dec!(3), "Food", "2025-03-10").await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = add_expense(&db, user, "Bagel", dec!(4), "Food", "2025-03-10").await;

    let listed = ExpenseRepository::new(db).list(user, None).await.unwrap();
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn test_users_are_isolated() {
    let db = setup().await;
    let owner = UserId::new();
    let intruder = UserId::new();
    let repo = ExpenseRepository::new(db.clone());

    let expense = add_expense(&db, owner, "Books", dec!(60), "Education", "2025-04-02").await;

    assert!(repo.list(intruder, None).await.unwrap().is_empty());
    assert!(repo.find(intruder, expense.id).await.unwrap().is_none());

    let update = repo
        .update(
            intruder,
            expense.id,
            &expense_input("Stolen", dec!(1), "Other", "2025-04-02"),
        )
        .await;
    assert!(matches!(
        update,
        Err(StoreError::Ledger(LedgerError::ExpenseNotFound(_)))
    ));

    let delete = repo.delete(intruder, expense.id).await;
    assert!(matches!(
        delete,
        Err(StoreError::Ledger(LedgerError::ExpenseNotFound(_)))
    ));

    // Unknown ids look exactly the same.
    let missing = repo.delete(owner, ExpenseId::new()).await;
    assert!(matches!(
        missing,
        Err(StoreError::Ledger(LedgerError::ExpenseNotFound(_)))
    ));
    assert_eq!(repo.list(owner, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_and_delete() {
    let db = setup().await;
    let user = UserId::new();
    let repo = ExpenseRepository::new(db.clone());

    let expense = add_expense(&db, user, "Gym", dec!(30), "Healthcare", "2025-05-03").await;

    let updated = repo
        .update(
            user,
            expense.id,
            &expense_input("Gym pass", dec!(45.75), "Entertainment", "2025-06-01"),
        )
        .await
        .unwrap();
    assert_eq!(updated.id, expense.id);
    assert_eq!(updated.title, "Gym pass");
    assert_eq!(updated.amount, dec!(45.75));
    assert_eq!(updated.category, Category::Entertainment);
    assert_eq!(updated.month(), month("2025-06"));

    repo.delete(user, expense.id).await.unwrap();
    assert!(repo.list(user, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_input_writes_nothing() {
    let db = setup().await;
    let user = UserId::new();
    let repo = ExpenseRepository::new(db.clone());

    let result = repo
        .create(user, &expense_input("X", dec!(10), "Food", "2025-01-01"))
        .await;

    assert!(matches!(
        result,
        Err(StoreError::Ledger(LedgerError::Validation(_)))
    ));
    assert!(repo.list(user, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_closed_month_rejects_every_write() {
    let db = setup().await;
    let user = UserId::new();
    let repo = ExpenseRepository::new(db.clone());

    let expense = add_expense(&db, user, "Groceries", dec!(80), "Food", "2025-01-10").await;
    ClosingRepository::new(db.clone())
        .close(user, month("2025-01"), Currency::Usd)
        .await
        .unwrap();

    let create = repo
        .create(user, &expense_input("Late entry", dec!(5), "Other", "2025-01-31"))
        .await;
    assert!(matches!(
        create,
        Err(StoreError::Ledger(LedgerError::MonthClosed(m))) if m == month("2025-01")
    ));

    let update = repo
        .update(
            user,
            expense.id,
            &expense_input("Groceries", dec!(81), "Food", "2025-01-10"),
        )
        .await;
    assert!(matches!(
        update,
        Err(StoreError::Ledger(LedgerError::MonthClosed(_)))
    ));

    // Moving the expense out of the closed month is also an edit of that month.
    let move_out = repo
        .update(
            user,
            expense.id,
            &expense_input("Groceries", dec!(80), "Food", "2025-02-10"),
        )
        .await;
    assert!(matches!(
        move_out,
        Err(StoreError::Ledger(LedgerError::MonthClosed(_)))
    ));

    let delete = repo.delete(user, expense.id).await;
    assert!(matches!(
        delete,
        Err(StoreError::Ledger(LedgerError::MonthClosed(_)))
    ));

    let stored = repo.find(user, expense.id).await.unwrap().unwrap();
    assert_eq!(stored.amount, dec!(80.00));
    assert_eq!(stored.date, expense.date);
}

#[tokio::test]
async fn test_cross_month_edit_blocked_by_closed_target() {
    let db = setup().await;
    let user = UserId::new();
    let repo = ExpenseRepository::new(db.clone());

    let expense = add_expense(&db, user, "Concert", dec!(120), "Entertainment", "2025-01-15").await;
    ClosingRepository::new(db.clone())
        .close(user, month("2025-02"), Currency::Usd)
        .await
        .unwrap();

    let result = repo
        .update(
            user,
            expense.id,
            &expense_input("Concert", dec!(120), "Entertainment", "2025-02-01"),
        )
        .await;

    assert!(matches!(
        result,
        Err(StoreError::Ledger(LedgerError::MonthClosed(m))) if m == month("2025-02")
    ));
    let stored = repo.find(user, expense.id).await.unwrap().unwrap();
    assert_eq!(stored.date, expense.date);
}

#[tokio::test]
async fn test_closing_other_user_month_does_not_lock_mine() {
    let db = setup().await;
    let me = UserId::new();
    let other = UserId::new();

    ClosingRepository::new(db.clone())
        .close(other, month("2025-01"), Currency::Thb)
        .await
        .unwrap();

    let created = ExpenseRepository::new(db)
        .create(me, &expense_input("Snacks", dec!(2.5), "Food", "2025-01-05"))
        .await;
    assert!(created.is_ok());
}
