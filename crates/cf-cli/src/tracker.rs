//! Operations shared by the command line and the HTTP API.
//!
//! Both front ends record activities and build summaries the same way: the
//! emission value is computed once here, before insertion, and never again.

use cf_core::{
    Activity, EmissionCalculator, NewActivity, Summary, SummaryWindow, ValidationError, summarize,
};
use cf_db::{Database, DbError};
use chrono::{Local, NaiveDate, Utc};
use thiserror::Error;

/// Errors from recording an activity.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The input was rejected before touching storage.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Storage failed.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Validates, normalizes, prices and stores an activity.
///
/// A missing date resolves to `today`.
pub fn record_activity(
    db: &mut Database,
    calculator: &EmissionCalculator,
    input: NewActivity,
    today: NaiveDate,
) -> Result<Activity, TrackerError> {
    input.validate()?;
    let input = input.normalized();
    let date = input.date.unwrap_or(today);
    let emission_kg = calculator.compute(&input.category, &input.kind, input.quantity, &input.unit);
    if !emission_kg.is_finite() {
        return Err(ValidationError::EmissionOutOfRange.into());
    }

    let activity = db.insert_activity(&input, emission_kg, date, Utc::now())?;
    tracing::info!(
        id = activity.id,
        category = %activity.category,
        kind = %activity.kind,
        emission_kg,
        %date,
        "recorded activity"
    );
    Ok(activity)
}

/// Loads the activities inside `window` and aggregates them.
pub fn summarize_window(db: &Database, window: SummaryWindow) -> Result<Summary, DbError> {
    let records = db.list_activities_in_range(window.from, window.to)?;
    Ok(summarize(&records, window))
}
