//! Activity endpoints

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use cf_core::{Activity, parse_date};

use crate::api::dto::{CreateActivityRequest, DeleteResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::tracker::{record_activity, today};

/// List every activity, oldest day first.
pub async fn list_activities(State(state): State<AppState>) -> ApiResult<Json<Vec<Activity>>> {
    let db = state.db.lock().await;
    Ok(Json(db.list_activities()?))
}

/// Record an activity and return it with its computed emissions.
pub async fn create_activity(
    State(state): State<AppState>,
    payload: Result<Json<CreateActivityRequest>, JsonRejection>,
) -> ApiResult<Json<Activity>> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let date = parse_date(req.date.as_deref().unwrap_or_default())
        .map_err(|_| ApiError::BadRequest("invalid date, use YYYY-MM-DD".to_string()))?;
    let mut input = req.into_new_activity();
    input.date = date;

    let mut db = state.db.lock().await;
    let activity = record_activity(&mut db, &state.calculator, input, today())?;
    Ok(Json(activity))
}

/// Delete an activity by ID.
///
/// Deleting an ID that does not exist still succeeds.
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid id".to_string()))?;

    let removed = state.db.lock().await.delete_activity(id)?;
    if removed {
        tracing::info!(id, "deleted activity");
    } else {
        tracing::debug!(id, "delete requested for missing activity");
    }

    Ok(Json(DeleteResponse { deleted: id }))
}
