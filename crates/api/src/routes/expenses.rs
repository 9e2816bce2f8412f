//! Expense ledger routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;
use serde_json::json;
use tally_core::MonthKey;
use tally_core::expense::ExpenseInput;
use tally_db::ExpenseRepository;
use tally_shared::types::ExpenseId;

use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::AuthUser};

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", put(update_expense).delete(delete_expense))
}

/// Query parameters for listing expenses.
#[derive(Debug, Deserialize)]
pub struct ListExpensesQuery {
    /// Optional `YYYY-MM` filter; empty means all months.
    pub month: Option<String>,
}

fn repo(state: &AppState) -> ExpenseRepository {
    ExpenseRepository::new((*state.db).clone())
}

/// Parses a path id. Malformed ids are indistinguishable from missing ones.
fn parse_expense_id(raw: &str) -> Result<ExpenseId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found("Expense not found."))
}

/// GET `/expenses` - List the caller's expenses, optionally for one month.
async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListExpensesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let month = match query.month.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<MonthKey>()?),
    };

    let expenses = repo(&state).list(auth.user_id(), month).await?;
    Ok(Json(json!({ "expenses": expenses })))
}

/// POST `/expenses` - Record an expense.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<ExpenseInput>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = repo(&state).create(auth.user_id(), &payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "expense": expense }))))
}

/// PUT `/expenses/{id}` - Replace an expense.
async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ExpenseInput>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_expense_id(&id)?;
    let expense = repo(&state).update(auth.user_id(), id, &payload).await?;
    Ok(Json(json!({ "expense": expense })))
}

/// DELETE `/expenses/{id}` - Delete an expense.
async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_expense_id(&id)?;
    repo(&state).delete(auth.user_id(), id).await?;
    Ok(Json(json!({ "ok": true })))
}
