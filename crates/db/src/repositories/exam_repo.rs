//! Read access to the `exams` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::exam::Exam;

const COLUMNS: &str = "id, name, academic_year, campus_id, created_at, updated_at";

pub struct ExamRepo;

impl ExamRepo {
    /// Find an exam by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Exam>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM exams WHERE id = $1");
        sqlx::query_as::<_, Exam>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
