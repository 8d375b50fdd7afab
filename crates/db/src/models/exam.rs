//! Exam entity model (read-only reference data).

use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `exams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: DbId,
    pub name: String,
    pub academic_year: Option<String>,
    pub campus_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
