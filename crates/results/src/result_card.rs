//! Per-student result card.
//!
//! Reads are independent queries without a shared transaction; the card is
//! a reporting view and tolerates a reader racing a concurrent write.

use campus_core::error::CoreError;
use campus_core::input::require_id;
use campus_core::result_card::{
    build_subject_results, compute_totals, ConfiguredSubject, ResultTotals, StoredMark,
    SubjectResult,
};
use campus_core::types::DbId;
use campus_db::models::exam::Exam;
use campus_db::models::grading_scheme::GradingScheme;
use campus_db::models::student::Student;
use campus_db::repositories::{
    ClassSubjectRepo, ExamRepo, ExamResultRepo, GradingSchemeRepo, StudentRepo,
};
use campus_db::DbPool;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ResultsResult;

/// Request parameters for a result card.
///
/// `scheme_id` overrides the campus default scheme when present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultCardQuery {
    #[serde(default)]
    pub student_id: Value,
    #[serde(default)]
    pub exam_id: Value,
    pub scheme_id: Option<DbId>,
}

/// Exam details shown on the card. Only `id` is guaranteed: a missing exam
/// does not fail the card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamInfo {
    pub id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
}

impl ExamInfo {
    fn placeholder(id: DbId) -> Self {
        Self {
            id,
            name: None,
            academic_year: None,
        }
    }
}

impl From<Exam> for ExamInfo {
    fn from(exam: Exam) -> Self {
        Self {
            id: exam.id,
            name: Some(exam.name),
            academic_year: exam.academic_year,
        }
    }
}

/// The scheme that graded the card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeInfo {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultCard {
    pub student: Student,
    pub exam: ExamInfo,
    pub scheme: Option<SchemeInfo>,
    pub subjects: Vec<SubjectResult>,
    pub totals: ResultTotals,
}

/// Build the result card for one student in one exam.
///
/// Fails with a validation error for malformed ids, not found for an unknown
/// student (or explicit scheme), and forbidden when the student or scheme
/// belongs to a campus other than `campus_id`.
pub async fn get_student_result_card(
    pool: &DbPool,
    query: &ResultCardQuery,
    campus_id: Option<DbId>,
) -> ResultsResult<ResultCard> {
    let student_id = require_id(&query.student_id, "studentId")?;
    let exam_id = require_id(&query.exam_id, "examId")?;

    let student = StudentRepo::find_by_id(pool, student_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "student",
            id: student_id,
        })?;
    if let (Some(requested), Some(owner)) = (campus_id, student.campus_id) {
        if requested != owner {
            return Err(CoreError::Forbidden(format!(
                "student {student_id} belongs to another campus"
            ))
            .into());
        }
    }

    let exam = ExamRepo::find_by_id(pool, exam_id)
        .await?
        .map(ExamInfo::from)
        .unwrap_or_else(|| ExamInfo::placeholder(exam_id));

    let configured: Vec<ConfiguredSubject> =
        ClassSubjectRepo::list_for_class(pool, &student.class_name, &student.section)
            .await?
            .iter()
            .map(ConfiguredSubject::from)
            .collect();

    let stored: Vec<StoredMark> = ExamResultRepo::list_for_student(pool, exam_id, student_id)
        .await?
        .iter()
        .map(StoredMark::from)
        .collect();

    let scheme = resolve_scheme(pool, query.scheme_id, campus_id.or(student.campus_id)).await?;
    let bands = scheme
        .as_ref()
        .map(GradingScheme::grade_bands)
        .unwrap_or_default();
    if scheme.is_none() {
        tracing::debug!(student_id, exam_id, "No grading scheme resolved, grading with empty bands");
    }

    let subjects = build_subject_results(&configured, &stored, &bands);
    let totals = compute_totals(&subjects, &bands);

    tracing::debug!(
        student_id,
        exam_id,
        configured = configured.len(),
        stored = stored.len(),
        lines = subjects.len(),
        "Result card assembled"
    );

    Ok(ResultCard {
        student,
        exam,
        scheme: scheme.map(|s| SchemeInfo {
            id: s.id,
            name: s.name,
        }),
        subjects,
        totals,
    })
}

/// Resolve the explicit scheme if one was requested, otherwise the default
/// for the effective campus.
async fn resolve_scheme(
    pool: &DbPool,
    scheme_id: Option<DbId>,
    campus_id: Option<DbId>,
) -> ResultsResult<Option<GradingScheme>> {
    let Some(id) = scheme_id else {
        return Ok(GradingSchemeRepo::find_default(pool, campus_id).await?);
    };

    let scheme = GradingSchemeRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "grading_scheme",
            id,
        })?;
    if let (Some(scope), Some(owner)) = (campus_id, scheme.campus_id) {
        if scope != owner {
            return Err(CoreError::Forbidden(format!(
                "grading scheme {id} belongs to another campus"
            ))
            .into());
        }
    }
    Ok(Some(scheme))
}

