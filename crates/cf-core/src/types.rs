//! Core type definitions with validation.

use chrono::NaiveDate;
use thiserror::Error;

/// Wire and storage format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A date string did not match `YYYY-MM-DD`.
    #[error("invalid date {value:?}, use YYYY-MM-DD")]
    InvalidDate { value: String },

    /// A quantity was NaN or infinite.
    #[error("quantity must be a finite number")]
    NonFiniteQuantity,

    /// The quantity is finite but its emissions overflow.
    #[error("quantity is too large to compute emissions")]
    EmissionOutOfRange,
}

/// Parses an optional `YYYY-MM-DD` date.
///
/// Blank input (empty or whitespace only) yields `Ok(None)`, leaving the caller
/// to pick a default such as today.
pub fn parse_date(s: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate {
            value: s.to_string(),
        })
}

/// Rejects empty (or whitespace-only) required fields.
pub fn require_non_empty(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}
