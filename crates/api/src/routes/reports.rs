//! Monthly report, plan and closing routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tally_core::MonthKey;
use tally_core::plan::MonthlyPlanInput;
use tally_core::reports::TrendLimit;
use tally_db::{ClosingRepository, PlanRepository, ReportRepository};

use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::AuthUser};

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/months", get(list_months))
        .route("/reports/trend", get(get_trend))
        .route("/reports/monthly", get(get_monthly_detail))
        .route("/reports/monthly/plan", get(get_plan).put(upsert_plan))
        .route("/reports/monthly/close", post(close_month))
}

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for the trend view.
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    /// Requested window; see [`TrendLimit::parse`].
    pub months: Option<String>,
}

/// Query naming one month.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// `YYYY-MM`.
    pub month: Option<String>,
}

/// Request body for closing a month.
#[derive(Debug, Default, Deserialize)]
pub struct CloseMonthRequest {
    /// `YYYY-MM`.
    #[serde(default)]
    pub month: Option<String>,
}

fn required_month(raw: Option<&str>) -> Result<MonthKey, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Err(ApiError::bad_request(
            "month is required in YYYY-MM format.",
        )),
        Some(raw) => Ok(raw.parse()?),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/reports/months` - One summary per month, newest first.
async fn list_months(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let months = ReportRepository::new((*state.db).clone())
        .list_summaries(auth.user_id())
        .await?;
    Ok(Json(json!({ "months": months })))
}

/// GET `/reports/trend` - Recent months, oldest first.
async fn get_trend(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TrendQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = TrendLimit::parse(query.months.as_deref());
    let points = ReportRepository::new((*state.db).clone())
        .list_trend(auth.user_id(), limit)
        .await?;
    Ok(Json(json!({ "points": points })))
}

/// GET `/reports/monthly` - Everything needed to render one month.
async fn get_monthly_detail(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let month = required_month(query.month.as_deref())?;
    let today = Utc::now().date_naive();

    let detail = ReportRepository::new((*state.db).clone())
        .monthly_detail(auth.user_id(), month, today)
        .await?;
    Ok(Json(json!({ "month": detail })))
}

/// GET `/reports/monthly/plan` - The plan for a month, or null.
async fn get_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let month = required_month(query.month.as_deref())?;
    let plan = PlanRepository::new((*state.db).clone())
        .get(auth.user_id(), month)
        .await?;
    Ok(Json(json!({ "plan": plan })))
}

/// PUT `/reports/monthly/plan` - Create or replace a month's plan.
async fn upsert_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<MonthlyPlanInput>,
) -> Result<impl IntoResponse, ApiError> {
    let plan = PlanRepository::new((*state.db).clone())
        .upsert(auth.user_id(), &payload)
        .await?;
    Ok(Json(json!({ "plan": plan })))
}

/// POST `/reports/monthly/close` - Close a month in the caller's currency.
async fn close_month(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<CloseMonthRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let month: MonthKey = payload.month.as_deref().unwrap_or_default().parse()?;
    let snapshot = ClosingRepository::new((*state.db).clone())
        .close(auth.user_id(), month, auth.currency())
        .await?;
    Ok(Json(json!({ "snapshot": snapshot })))
}
