//! Class subject configuration (read-only reference data).

use campus_core::result_card::ConfiguredSubject;
use campus_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `class_subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSubject {
    pub id: DbId,
    pub class_name: String,
    pub section: String,
    pub subject_name: String,
    pub full_marks: Option<f64>,
}

impl From<&ClassSubject> for ConfiguredSubject {
    fn from(row: &ClassSubject) -> Self {
        ConfiguredSubject {
            subject_name: row.subject_name.clone(),
            full_marks: row.full_marks,
        }
    }
}
