//! Summary endpoint

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use cf_core::{Summary, SummaryWindow, parse_date};
use chrono::NaiveDate;

use crate::api::dto::SummaryQuery;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::tracker::{summarize_window, today};

/// Totals, per-category and per-day emissions for `[from, to]`.
///
/// Blank bounds fall back to the trailing 30 days.
pub async fn get_summary(
    State(state): State<AppState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> ApiResult<Json<Summary>> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let from = parse_bound(query.from.as_deref(), "invalid from")?;
    let to = parse_bound(query.to.as_deref(), "invalid to")?;
    let window = SummaryWindow::resolve(from, to, today());

    let db = state.db.lock().await;
    Ok(Json(summarize_window(&db, window)?))
}

fn parse_bound(value: Option<&str>, message: &str) -> ApiResult<Option<NaiveDate>> {
    parse_date(value.unwrap_or_default()).map_err(|_| ApiError::BadRequest(message.to_string()))
}
