//! Repository for the `grading_schemes` table.
//!
//! Schemes are scoped by `campus_id`; a NULL campus is the global scope.
//! Within a scope at most one scheme is the default. Every transaction that
//! can make a scheme default first takes a transaction-scoped advisory lock
//! on the scope, then clears its siblings, so concurrent promotions in one
//! scope run one after another and the last to commit wins. The partial
//! unique indexes `uq_grading_schemes_default_per_campus` and
//! `uq_grading_schemes_default_global` reject anything that slips past.
//!
//! `campus_id` is fixed at creation, so a scheme's scope can be read before
//! the scope lock is taken.

use campus_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::grading_scheme::{CreateGradingScheme, GradingScheme, UpdateGradingScheme};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, academic_year, bands, is_default, campus_id, \
    created_by, created_at, updated_at";

/// Provides CRUD and default-resolution operations for grading schemes.
pub struct GradingSchemeRepo;

impl GradingSchemeRepo {
    /// List schemes for a campus, default first, then most recently updated.
    ///
    /// `None` lists every scheme regardless of campus.
    pub async fn list(
        pool: &PgPool,
        campus_id: Option<DbId>,
    ) -> Result<Vec<GradingScheme>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grading_schemes \
             WHERE ($1::BIGINT IS NULL OR campus_id = $1) \
             ORDER BY is_default DESC, updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, GradingScheme>(&query)
            .bind(campus_id)
            .fetch_all(pool)
            .await
    }

    /// Find the default scheme for a campus scope (`None` = global scope).
    pub async fn find_default(
        pool: &PgPool,
        campus_id: Option<DbId>,
    ) -> Result<Option<GradingScheme>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grading_schemes \
             WHERE is_default AND campus_id IS NOT DISTINCT FROM $1 \
             LIMIT 1"
        );
        sqlx::query_as::<_, GradingScheme>(&query)
            .bind(campus_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a scheme by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GradingScheme>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grading_schemes WHERE id = $1");
        sqlx::query_as::<_, GradingScheme>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new scheme. If it is created as the default, siblings in the
    /// same campus scope are demoted in the same transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGradingScheme,
        campus_id: Option<DbId>,
        created_by: Option<DbId>,
    ) -> Result<GradingScheme, sqlx::Error> {
        let is_default = input.is_default.unwrap_or(false);
        let mut tx = pool.begin().await?;

        if is_default {
            Self::lock_default_scope(&mut *tx, campus_id).await?;
            Self::clear_default_in_scope(&mut *tx, campus_id, None).await?;
        }

        let query = format!(
            "INSERT INTO grading_schemes \
                (name, academic_year, bands, is_default, campus_id, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let scheme = sqlx::query_as::<_, GradingScheme>(&query)
            .bind(input.name.trim())
            .bind(&input.academic_year)
            .bind(&input.bands)
            .bind(is_default)
            .bind(campus_id)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(scheme)
    }

    /// Partially update a scheme. Only non-`None` fields are applied.
    ///
    /// Setting `is_default = true` demotes siblings in the scheme's scope
    /// first. Returns `None` if no scheme with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGradingScheme,
    ) -> Result<Option<GradingScheme>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_default == Some(true) {
            let Some(campus_id) = Self::scope_of(&mut *tx, id).await? else {
                tx.rollback().await?;
                return Ok(None);
            };
            Self::lock_default_scope(&mut *tx, campus_id).await?;
            Self::clear_default_in_scope(&mut *tx, campus_id, Some(id)).await?;
        }

        let query = format!(
            "UPDATE grading_schemes SET \
                name          = COALESCE($2, name), \
                academic_year = COALESCE($3, academic_year), \
                bands         = COALESCE($4, bands), \
                is_default    = COALESCE($5, is_default), \
                updated_at    = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let scheme = sqlx::query_as::<_, GradingScheme>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.academic_year)
            .bind(&input.bands)
            .bind(input.is_default)
            .fetch_optional(&mut *tx)
            .await?;

        if scheme.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }
        tx.commit().await?;
        Ok(scheme)
    }

    /// Make a scheme the default for its campus scope.
    ///
    /// Clears the flag on every sibling, then sets it on the target, inside
    /// one transaction so readers never observe zero or two defaults.
    /// Concurrent calls in the same scope queue on the scope lock.
    /// Returns `None` (and changes nothing) if the scheme does not exist.
    pub async fn set_default(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GradingScheme>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(campus_id) = Self::scope_of(&mut *tx, id).await? else {
            tx.rollback().await?;
            return Ok(None);
        };
        Self::lock_default_scope(&mut *tx, campus_id).await?;

        let demoted = Self::clear_default_in_scope(&mut *tx, campus_id, Some(id)).await?;

        let query = format!(
            "UPDATE grading_schemes SET is_default = TRUE, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let scheme = sqlx::query_as::<_, GradingScheme>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        // Deleted while waiting on the scope lock.
        if scheme.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }
        tx.commit().await?;
        tracing::info!(scheme_id = id, ?campus_id, demoted, "Grading scheme set as default");
        Ok(scheme)
    }

    /// Delete a scheme by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM grading_schemes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Campus scope of a scheme.
    ///
    /// Outer `None` means the scheme does not exist; inner `None` is the
    /// global scope.
    async fn scope_of(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Option<DbId>>, sqlx::Error> {
        let row: Option<(Option<DbId>,)> =
            sqlx::query_as("SELECT campus_id FROM grading_schemes WHERE id = $1")
                .bind(id)
                .fetch_optional(conn)
                .await?;
        Ok(row.map(|(campus_id,)| campus_id))
    }

    /// Serialize default changes within one campus scope until the
    /// surrounding transaction ends.
    async fn lock_default_scope(
        conn: &mut PgConnection,
        campus_id: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "SELECT pg_advisory_xact_lock(                 hashtext('grading_schemes.default'),                 hashtext(COALESCE($1::BIGINT::TEXT, 'global')))",
        )
        .bind(campus_id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Clear `is_default` on every scheme in a scope, optionally sparing one.
    async fn clear_default_in_scope(
        conn: &mut PgConnection,
        campus_id: Option<DbId>,
        except_id: Option<DbId>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE grading_schemes SET is_default = FALSE, updated_at = NOW() \
             WHERE is_default \
               AND campus_id IS NOT DISTINCT FROM $1 \
               AND ($2::BIGINT IS NULL OR id <> $2)",
        )
        .bind(campus_id)
        .bind(except_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }
}
