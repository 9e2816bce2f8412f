//! HTTP tests for report, plan and closing routes.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};
use tally_shared::types::{Currency, UserId};

use common::TestApp;

async fn add_expense(app: &TestApp, token: &str, title: &str, amount: &str, category: &str, date: &str) {
    let (status, _, _) = app
        .send(
            Method::POST,
            "/api/v1/expenses",
            Some(token),
            Some(json!({
                "title": title,
                "amount": amount,
                "category": category,
                "date": date
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_close_month_locks_ledger() {
    let app = TestApp::new().await;
    let token = app.token(UserId::new(), Currency::Usd);

    add_expense(&app, &token, "Groceries", "50", "Food", "2025-01-03").await;
    add_expense(&app, &token, "Takeout", "30", "Food", "2025-01-18").await;
    add_expense(&app, &token, "Bus pass", "40.50", "Transportation", "2025-01-20").await;

    let (status, body, _) = app
        .send(
            Method::POST,
            "/api/v1/reports/monthly/close",
            Some(&token),
            Some(json!({ "month": "2025-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let snapshot = &body["snapshot"];
    assert_eq!(snapshot["month"], "2025-01");
    assert_eq!(snapshot["isClosed"], true);
    assert_eq!(snapshot["totalAmount"], "120.50");
    assert_eq!(snapshot["transactionCount"], 3);
    assert_eq!(snapshot["topCategory"], "Food");
    assert_eq!(snapshot["categoryBreakdown"]["Transportation"], "40.50");
    assert_eq!(
        snapshot["summaryText"],
        "Closed 2025-01 with 3 transactions and $120.50 total spend."
    );

    let (status, again, _) = app
        .send(
            Method::POST,
            "/api/v1/reports/monthly/close",
            Some(&token),
            Some(json!({ "month": "2025-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["snapshot"]["id"], snapshot["id"]);

    let (status, body, _) = app
        .send(
            Method::POST,
            "/api/v1/expenses",
            Some(&token),
            Some(json!({
                "title": "Late entry",
                "amount": 5,
                "category": "Other",
                "date": "2025-01-31"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::LOCKED);
    assert_eq!(body["error"], "MONTH_CLOSED");
    assert_eq!(body["message"], "2025-01 is closed and cannot be edited.");
}

#[tokio::test]
async fn test_close_uses_caller_currency() {
    let app = TestApp::new().await;
    let token = app.token(UserId::new(), Currency::Thb);

    add_expense(&app, &token, "Hotel", "1234.5", "Other", "2025-04-12").await;

    let (_, body, _) = app
        .send(
            Method::POST,
            "/api/v1/reports/monthly/close",
            Some(&token),
            Some(json!({ "month": "2025-04" })),
        )
        .await;

    assert_eq!(
        body["snapshot"]["summaryText"],
        "Closed 2025-04 with 1 transactions and ฿1,234.50 total spend."
    );
}

#[tokio::test]
async fn test_close_requires_valid_month() {
    let app = TestApp::new().await;
    let token = app.token(UserId::new(), Currency::Usd);

    let (status, body, _) = app
        .send(
            Method::POST,
            "/api/v1/reports/monthly/close",
            Some(&token),
            Some(json!({ "month": "2025-1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "month must be in YYYY-MM format.");

    let (status, _, _) = app
        .send(
            Method::POST,
            "/api/v1/reports/monthly/close",
            Some(&token),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_plan_put_and_get() {
    let app = TestApp::new().await;
    let token = app.token(UserId::new(), Currency::Usd);

    let (status, body, _) = app
        .send(
            Method::GET,
            "/api/v1/reports/monthly/plan?month=2025-02",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plan"], Value::Null);

    let (status, body, _) = app
        .send(
            Method::PUT,
            "/api/v1/reports/monthly/plan",
            Some(&token),
            Some(json!({
                "month": "2025-02",
                "incomeAmount": "3000",
                "savingsTarget": 500
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plan"]["incomeAmount"], "3000.00");
    assert_eq!(body["plan"]["savingsTarget"], "500.00");

    let (_, body, _) = app
        .send(
            Method::GET,
            "/api/v1/reports/monthly/plan?month=2025-02",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(body["plan"]["month"], "2025-02");

    let (status, body, _) = app
        .send(
            Method::PUT,
            "/api/v1/reports/monthly/plan",
            Some(&token),
            Some(json!({
                "month": "2025-02",
                "incomeAmount": 100,
                "savingsTarget": 200
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "savingsTarget cannot be greater than incomeAmount."
    );
}

#[tokio::test]
async fn test_months_trend_and_detail() {
    let app = TestApp::new().await;
    let token = app.token(UserId::new(), Currency::Usd);

    add_expense(&app, &token, "Rent", "900", "Housing", "2025-01-01").await;
    add_expense(&app, &token, "Lunch", "12.25", "Food", "2025-02-11").await;
    app.send(
        Method::PUT,
        "/api/v1/reports/monthly/plan",
        Some(&token),
        Some(json!({ "month": "2025-03", "incomeAmount": 2000 })),
    )
    .await;

    let (status, body, _) = app
        .send(Method::GET, "/api/v1/reports/months", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let months: Vec<&str> = body["months"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["month"].as_str().unwrap())
        .collect();
    assert_eq!(months, ["2025-03", "2025-02", "2025-01"]);
    assert_eq!(body["months"][0]["topCategory"], "No expenses yet");

    let (status, body, _) = app
        .send(Method::GET, "/api/v1/reports/trend?months=abc", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let points = body["points"].as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0]["month"], "2025-01");
    assert_eq!(points[2]["plannedSpendable"], "2000.00");
    assert_eq!(points[2]["remainingBudget"], "2000.00");

    let (status, body, _) = app
        .send(
            Method::GET,
            "/api/v1/reports/monthly?month=2025-02",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let detail = &body["month"];
    assert_eq!(detail["summary"]["totalAmount"], "12.25");
    assert_eq!(detail["summary"]["isClosed"], false);
    assert_eq!(detail["budget"]["incomeRequired"], true);
    assert_eq!(detail["expenses"].as_array().unwrap().len(), 1);

    let (status, body, _) = app
        .send(Method::GET, "/api/v1/reports/monthly", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "month is required in YYYY-MM format.");
}
