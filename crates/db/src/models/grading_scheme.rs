//! Grading scheme entity model and DTOs.

use campus_core::grading::GradeBands;
use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `grading_schemes` table.
///
/// `bands` is the stored `{label: minimum percentage}` object.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingScheme {
    pub id: DbId,
    pub name: String,
    pub academic_year: Option<String>,
    pub bands: serde_json::Value,
    pub is_default: bool,
    pub campus_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl GradingScheme {
    /// The scheme's bands in lookup order.
    pub fn grade_bands(&self) -> GradeBands {
        GradeBands::from_json(&self.bands)
    }
}

/// DTO for creating a grading scheme.
///
/// Campus and creator come from the request scope, not the body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGradingScheme {
    pub name: String,
    pub academic_year: Option<String>,
    #[serde(default = "empty_bands")]
    pub bands: serde_json::Value,
    pub is_default: Option<bool>,
}

/// DTO for updating a grading scheme. Only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGradingScheme {
    pub name: Option<String>,
    pub academic_year: Option<String>,
    pub bands: Option<serde_json::Value>,
    pub is_default: Option<bool>,
}

fn empty_bands() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
