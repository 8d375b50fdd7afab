//! Student entity model (read-only reference data).

use campus_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: DbId,
    pub name: String,
    pub roll_number: Option<String>,
    pub class_name: String,
    pub section: String,
    pub campus_id: Option<DbId>,
    pub is_active: bool,
}
