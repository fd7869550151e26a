//! Request and response bodies.

use cf_core::NewActivity;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/activities`.
#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Absent or `null` means zero.
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    /// `YYYY-MM-DD`; blank or absent means today.
    #[serde(default)]
    pub date: Option<String>,
}

impl CreateActivityRequest {
    /// Converts into core input. The date is resolved separately.
    pub fn into_new_activity(self) -> NewActivity {
        let quantity = self.quantity.unwrap_or_default();
        let mut activity = NewActivity::new(self.category, self.kind, quantity).with_unit(self.unit);
        if let Some(meta) = self.meta {
            activity.meta = meta;
        }
        activity
    }
}

/// Query string of `GET /api/summary`.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Body of `DELETE /api/activities/:id`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: i64,
}
