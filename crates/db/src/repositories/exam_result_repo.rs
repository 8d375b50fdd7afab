//! Repository for the `exam_results` table.
//!
//! Marks are keyed by `(exam_id, student_id, subject_key)`, where
//! `subject_key` is a generated column holding the trimmed, lower-cased
//! subject. Rows are only ever written through [`ExamResultRepo::bulk_upsert`].

use campus_core::marks::MarkRow;
use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::exam_result::{ExamResult, MarkEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, exam_id, student_id, subject, marks, grade, campus_id, \
    created_at, updated_at";

/// Provides data access for stored exam marks.
pub struct ExamResultRepo;

impl ExamResultRepo {
    /// Upsert a batch of normalized marks for one exam in a single transaction.
    ///
    /// On conflict the stored `marks` and `grade` are overwritten and the
    /// stored `campus_id` is kept when `campus_id` is `None`. Any failure
    /// rolls back the whole batch. An empty batch never opens a transaction.
    ///
    /// One result is returned per input row, in order. Rows are expected to
    /// carry distinct keys; a repeated key is written twice and appears twice
    /// in the output. `campus_core::marks::normalize_entries` collapses
    /// repeats before they get here.
    pub async fn bulk_upsert(
        pool: &PgPool,
        exam_id: DbId,
        rows: &[MarkRow],
        campus_id: Option<DbId>,
    ) -> Result<Vec<ExamResult>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "INSERT INTO exam_results (exam_id, student_id, subject, marks, grade, campus_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (exam_id, student_id, subject_key) \
             DO UPDATE SET \
                marks      = EXCLUDED.marks, \
                grade      = EXCLUDED.grade, \
                campus_id  = COALESCE(EXCLUDED.campus_id, exam_results.campus_id), \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut results = Vec::with_capacity(rows.len());

        for row in rows {
            let written = sqlx::query_as::<_, ExamResult>(&query)
                .bind(exam_id)
                .bind(row.student_id)
                .bind(&row.subject)
                .bind(row.marks)
                .bind(&row.grade)
                .bind(campus_id)
                .fetch_one(&mut *tx)
                .await;

            match written {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::warn!(
                        exam_id,
                        student_id = row.student_id,
                        subject = %row.subject,
                        error = %e,
                        "Marks batch failed, rolling back"
                    );
                    tx.rollback().await?;
                    return Err(e);
                }
            }
        }

        tx.commit().await?;
        Ok(results)
    }

    /// List every stored mark for a student in one exam, in insertion order.
    pub async fn list_for_student(
        pool: &PgPool,
        exam_id: DbId,
        student_id: DbId,
    ) -> Result<Vec<ExamResult>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM exam_results \
             WHERE exam_id = $1 AND student_id = $2 \
             ORDER BY id"
        );
        sqlx::query_as::<_, ExamResult>(&query)
            .bind(exam_id)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Active students of a class/section left-joined against their mark
    /// for one exam and subject (case-insensitive subject match).
    ///
    /// Rows come back unordered; callers apply roster ordering.
    pub async fn list_entries(
        pool: &PgPool,
        exam_id: DbId,
        class_name: &str,
        section: &str,
        subject: &str,
        campus_id: Option<DbId>,
    ) -> Result<Vec<MarkEntry>, sqlx::Error> {
        sqlx::query_as::<_, MarkEntry>(
            "SELECT \
                s.id AS student_id, \
                s.name AS student_name, \
                s.roll_number, \
                s.class_name, \
                s.section, \
                r.id AS result_id, \
                r.marks, \
                r.grade \
             FROM students s \
             LEFT JOIN exam_results r \
                ON r.student_id = s.id \
               AND r.exam_id = $1 \
               AND r.subject_key = lower(btrim($4)) \
             WHERE s.is_active \
               AND s.class_name = $2 \
               AND s.section = $3 \
               AND ($5::BIGINT IS NULL OR s.campus_id = $5)",
        )
        .bind(exam_id)
        .bind(class_name)
        .bind(section)
        .bind(subject)
        .bind(campus_id)
        .fetch_all(pool)
        .await
    }
}
