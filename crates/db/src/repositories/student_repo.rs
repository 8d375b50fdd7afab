//! Read access to the `students` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::Student;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, roll_number, class_name, section, campus_id, is_active";

/// Provides read operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Find a student by ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
