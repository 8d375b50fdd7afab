//! Read access to the `class_subjects` configuration table.

use sqlx::PgPool;

use crate::models::class_subject::ClassSubject;

/// Provides read operations for class subject configuration.
pub struct ClassSubjectRepo;

impl ClassSubjectRepo {
    /// List the configured subjects for a class and section, in
    /// configuration order.
    pub async fn list_for_class(
        pool: &PgPool,
        class_name: &str,
        section: &str,
    ) -> Result<Vec<ClassSubject>, sqlx::Error> {
        sqlx::query_as::<_, ClassSubject>(
            "SELECT id, class_name, section, subject_name, full_marks \
             FROM class_subjects \
             WHERE class_name = $1 AND section = $2 \
             ORDER BY id",
        )
        .bind(class_name)
        .bind(section)
        .fetch_all(pool)
        .await
    }
}
