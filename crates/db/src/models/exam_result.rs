//! Exam result (stored mark) model and the entry-list join row.

use campus_core::result_card::StoredMark;
use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `exam_results` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub id: DbId,
    pub exam_id: DbId,
    pub student_id: DbId,
    pub subject: String,
    pub marks: Option<f64>,
    pub grade: Option<String>,
    pub campus_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&ExamResult> for StoredMark {
    fn from(row: &ExamResult) -> Self {
        StoredMark {
            subject: row.subject.clone(),
            marks: row.marks,
            grade: row.grade.clone(),
        }
    }
}

/// A roster row left-joined against the result for one exam and subject.
///
/// `result_id`, `marks` and `grade` are `None` when no mark has been entered.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkEntry {
    pub student_id: DbId,
    pub student_name: String,
    pub roll_number: Option<String>,
    pub class_name: String,
    pub section: String,
    pub result_id: Option<DbId>,
    pub marks: Option<f64>,
    pub grade: Option<String>,
}
