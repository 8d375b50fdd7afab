//! Bulk mark ingestion.

use campus_core::input::require_id;
use campus_core::marks::{normalize_entries, MarkEntryInput};
use campus_core::types::DbId;
use campus_db::models::exam_result::ExamResult;
use campus_db::repositories::ExamResultRepo;
use campus_db::DbPool;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ResultsResult;

/// Body of a bulk marks submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkMarksRequest {
    #[serde(default)]
    pub exam_id: Value,
    #[serde(default)]
    pub items: Vec<MarkEntryInput>,
}

/// Upsert a batch of marks for one exam.
///
/// `exam_id` must be an integer; otherwise a validation error is returned
/// before any transaction starts. Rows with an unusable student id or a blank
/// subject are dropped silently. Rows repeating a `(student, subject)` pair
/// collapse into the last one. The surviving rows are written in a single
/// transaction: either all of them persist or none do.
///
/// Returns the rows actually written, one per distinct key.
pub async fn bulk_upsert(
    pool: &DbPool,
    exam_id: &Value,
    items: &[MarkEntryInput],
    campus_id: Option<DbId>,
) -> ResultsResult<Vec<ExamResult>> {
    let exam_id = require_id(exam_id, "examId")?;
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let normalized = normalize_entries(items);
    if normalized.skipped > 0 || normalized.merged > 0 {
        tracing::debug!(
            exam_id,
            skipped = normalized.skipped,
            merged = normalized.merged,
            "Dropped or merged mark rows"
        );
    }

    let written = ExamResultRepo::bulk_upsert(pool, exam_id, &normalized.rows, campus_id).await?;

    tracing::info!(
        exam_id,
        ?campus_id,
        written = written.len(),
        skipped = normalized.skipped,
        "Marks batch committed"
    );
    Ok(written)
}
