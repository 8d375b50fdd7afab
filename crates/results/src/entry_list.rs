//! Roster-with-marks view used to drive bulk mark entry.

use campus_core::entry_list::{compare_roster, EntryListParams};
use campus_core::types::DbId;
use campus_db::models::exam_result::MarkEntry;
use campus_db::repositories::ExamResultRepo;
use campus_db::DbPool;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ResultsResult;

/// Raw request parameters. All four are required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryListQuery {
    #[serde(default)]
    pub exam_id: Value,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub subject: Option<String>,
}

/// List active students of a class/section with their mark (if any) for one
/// exam and subject, in roster order.
pub async fn list_entries(
    pool: &DbPool,
    query: &EntryListQuery,
    campus_id: Option<DbId>,
) -> ResultsResult<Vec<MarkEntry>> {
    let params = EntryListParams::validate(
        &query.exam_id,
        query.class_name.as_deref(),
        query.section.as_deref(),
        query.subject.as_deref(),
    )?;

    let mut entries = ExamResultRepo::list_entries(
        pool,
        params.exam_id,
        &params.class_name,
        &params.section,
        &params.subject,
        campus_id,
    )
    .await?;

    entries.sort_by(|a, b| {
        compare_roster(
            a.roll_number.as_deref(),
            &a.student_name,
            b.roll_number.as_deref(),
            &b.student_name,
        )
    });
    Ok(entries)
}
