//! Activity records: the one entity the tracker stores.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ValidationError, require_non_empty};

/// A stored activity together with the emissions computed when it was created.
///
/// `emission_kg` is fixed at write time and never recomputed, so a record keeps
/// the factors that were in effect when it was logged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    /// Storage-assigned identifier.
    pub id: i64,

    /// Lowercased category, e.g. `transport`. Unknown categories are kept as-is.
    pub category: String,

    /// Category-specific type, e.g. `car` or `vegan_day`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Amount in the unit implied by (category, type).
    pub quantity: f64,

    /// Free-form unit label, lowercased.
    #[serde(default)]
    pub unit: String,

    /// Arbitrary extra fields supplied by the client.
    #[serde(default = "empty_meta")]
    pub meta: serde_json::Value,

    /// Kilograms of CO2e, rounded to 2 decimals.
    pub emission_kg: f64,

    /// Calendar day the activity happened on.
    pub date: NaiveDate,

    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

/// Input for creating an activity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub category: String,
    pub kind: String,
    pub quantity: f64,
    pub unit: String,
    pub meta: serde_json::Value,
    /// `None` means "today" at the time of insertion.
    pub date: Option<NaiveDate>,
}

impl NewActivity {
    /// Creates an input with no unit, no metadata and no explicit date.
    pub fn new(category: impl Into<String>, kind: impl Into<String>, quantity: f64) -> Self {
        Self {
            category: category.into(),
            kind: kind.into(),
            quantity,
            unit: String::new(),
            meta: empty_meta(),
            date: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Checks that the required string fields are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty(&self.category, "category")?;
        require_non_empty(&self.kind, "type")?;
        if !self.quantity.is_finite() {
            return Err(ValidationError::NonFiniteQuantity);
        }
        Ok(())
    }

    /// Returns a copy with category, type and unit trimmed and lowercased.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            category: self.category.trim().to_lowercase(),
            kind: self.kind.trim().to_lowercase(),
            unit: self.unit.trim().to_lowercase(),
            meta: if self.meta.is_null() {
                empty_meta()
            } else {
                self.meta
            },
            ..self
        }
    }
}

fn empty_meta() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalized_lowercases_strings() {
        let input = NewActivity::new(" Transport", "CAR ", 12.0).with_unit("KM");
        let normalized = input.normalized();

        assert_eq!(normalized.category, "transport");
        assert_eq!(normalized.kind, "car");
        assert_eq!(normalized.unit, "km");
        assert_eq!(normalized.meta, json!({}));
    }

    #[test]
    fn normalized_replaces_null_meta() {
        let mut input = NewActivity::new("food", "vegan_day", 1.0);
        input.meta = serde_json::Value::Null;
        assert_eq!(input.normalized().meta, json!({}));
    }

    #[test]
    fn validate_requires_category_and_type() {
        let err = NewActivity::new("", "car", 1.0).validate().unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "category" });

        let err = NewActivity::new("transport", " ", 1.0).validate().unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "type" });
    }

    #[test]
    fn validate_rejects_non_finite_quantity() {
        for quantity in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = NewActivity::new("transport", "car", quantity)
                .validate()
                .unwrap_err();
            assert_eq!(err, ValidationError::NonFiniteQuantity);
        }
        assert!(NewActivity::new("transport", "car", 1e300).validate().is_ok());
    }

    #[test]
    fn activity_serializes_type_and_date() {
        let activity = Activity {
            id: 7,
            category: "transport".to_string(),
            kind: "bus".to_string(),
            quantity: 10.0,
            unit: "km".to_string(),
            meta: json!({"route": "42"}),
            emission_kg: 1.05,
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            created_at: "2025-01-02T08:00:00Z".parse().unwrap(),
        };

        let value = serde_json::to_value(&activity).unwrap();
        assert_eq!(value["type"], "bus");
        assert_eq!(value["date"], "2025-01-02");
        assert_eq!(value["meta"]["route"], "42");

        let parsed: Activity = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, activity);
    }
}
