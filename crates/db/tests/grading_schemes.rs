//! Integration tests for grading scheme CRUD and default resolution.
//!
//! Exercises the `GradingSchemeRepo` against a real database:
//! - Create stores bands and scope
//! - Creating or updating a default demotes siblings in the same campus only
//! - `set_default` leaves exactly one default whatever the prior state
//! - `set_default` on an unknown id is a no-op returning `None`
//! - Concurrent promotions in one campus all succeed, leaving one default
//! - Campus 0 and the global scope keep separate defaults
//! - Listing orders the default first

use campus_db::models::grading_scheme::{CreateGradingScheme, UpdateGradingScheme};
use campus_db::repositories::GradingSchemeRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_scheme(name: &str, is_default: bool) -> CreateGradingScheme {
    CreateGradingScheme {
        name: name.to_string(),
        academic_year: Some("2025-26".to_string()),
        bands: json!({"A": 90, "B": 75, "C": 60}),
        is_default: Some(is_default),
    }
}

async fn count_defaults(pool: &PgPool, campus_id: Option<i64>) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM grading_schemes \
         WHERE is_default AND campus_id IS NOT DISTINCT FROM $1",
    )
    .bind(campus_id)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_scheme(pool: PgPool) {
    let scheme = GradingSchemeRepo::create(&pool, &new_scheme("  Primary  ", false), Some(1), Some(42))
        .await
        .unwrap();

    assert!(scheme.id > 0);
    assert_eq!(scheme.name, "Primary");
    assert_eq!(scheme.campus_id, Some(1));
    assert_eq!(scheme.created_by, Some(42));
    assert!(!scheme.is_default);
    assert_eq!(scheme.grade_bands().grade_for(82.0), "B");

    let found = GradingSchemeRepo::find_by_id(&pool, scheme.id).await.unwrap();
    assert_eq!(found.unwrap().bands, json!({"A": 90, "B": 75, "C": 60}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_id_unknown_is_none(pool: PgPool) {
    assert!(GradingSchemeRepo::find_by_id(&pool, 9999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_default_demotes_same_campus_only(pool: PgPool) {
    let first = GradingSchemeRepo::create(&pool, &new_scheme("First", true), Some(1), None)
        .await
        .unwrap();
    let other_campus = GradingSchemeRepo::create(&pool, &new_scheme("Other", true), Some(2), None)
        .await
        .unwrap();
    let second = GradingSchemeRepo::create(&pool, &new_scheme("Second", true), Some(1), None)
        .await
        .unwrap();

    assert!(second.is_default);
    let first = GradingSchemeRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert!(!first.is_default, "earlier default should be demoted");
    let other = GradingSchemeRepo::find_by_id(&pool, other_campus.id)
        .await
        .unwrap()
        .unwrap();
    assert!(other.is_default, "other campus must be untouched");

    let default = GradingSchemeRepo::find_default(&pool, Some(1)).await.unwrap().unwrap();
    assert_eq!(default.id, second.id);
    assert_eq!(count_defaults(&pool, Some(1)).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_global_scope_is_separate(pool: PgPool) {
    let global = GradingSchemeRepo::create(&pool, &new_scheme("Global", true), None, None)
        .await
        .unwrap();
    GradingSchemeRepo::create(&pool, &new_scheme("Campus", true), Some(3), None)
        .await
        .unwrap();

    let default = GradingSchemeRepo::find_default(&pool, None).await.unwrap().unwrap();
    assert_eq!(default.id, global.id);
    assert!(GradingSchemeRepo::find_default(&pool, Some(4)).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_default_from_zero_defaults(pool: PgPool) {
    let a = GradingSchemeRepo::create(&pool, &new_scheme("A", false), Some(1), None)
        .await
        .unwrap();
    GradingSchemeRepo::create(&pool, &new_scheme("B", false), Some(1), None)
        .await
        .unwrap();
    assert_eq!(count_defaults(&pool, Some(1)).await, 0);

    let updated = GradingSchemeRepo::set_default(&pool, a.id).await.unwrap().unwrap();
    assert!(updated.is_default);
    assert_eq!(count_defaults(&pool, Some(1)).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_default_swaps_existing_default(pool: PgPool) {
    let a = GradingSchemeRepo::create(&pool, &new_scheme("A", true), Some(1), None)
        .await
        .unwrap();
    let b = GradingSchemeRepo::create(&pool, &new_scheme("B", false), Some(1), None)
        .await
        .unwrap();

    GradingSchemeRepo::set_default(&pool, b.id).await.unwrap().unwrap();

    let a = GradingSchemeRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert!(!a.is_default);
    assert_eq!(count_defaults(&pool, Some(1)).await, 1);
    let default = GradingSchemeRepo::find_default(&pool, Some(1)).await.unwrap().unwrap();
    assert_eq!(default.id, b.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_default_is_idempotent(pool: PgPool) {
    let a = GradingSchemeRepo::create(&pool, &new_scheme("A", true), Some(1), None)
        .await
        .unwrap();

    GradingSchemeRepo::set_default(&pool, a.id).await.unwrap().unwrap();
    GradingSchemeRepo::set_default(&pool, a.id).await.unwrap().unwrap();

    assert_eq!(count_defaults(&pool, Some(1)).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_default_unknown_is_noop(pool: PgPool) {
    let a = GradingSchemeRepo::create(&pool, &new_scheme("A", true), Some(1), None)
        .await
        .unwrap();

    let result = GradingSchemeRepo::set_default(&pool, 424242).await.unwrap();
    assert!(result.is_none());

    let a = GradingSchemeRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert!(a.is_default, "existing default must survive a miss");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_is_partial(pool: PgPool) {
    let a = GradingSchemeRepo::create(&pool, &new_scheme("A", false), Some(1), None)
        .await
        .unwrap();

    let updated = GradingSchemeRepo::update(
        &pool,
        a.id,
        &UpdateGradingScheme {
            bands: Some(json!({"Pass": 40})),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "A");
    assert_eq!(updated.academic_year.as_deref(), Some("2025-26"));
    assert_eq!(updated.bands, json!({"Pass": 40}));
    assert!(updated.updated_at >= a.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_to_default_demotes_siblings(pool: PgPool) {
    let a = GradingSchemeRepo::create(&pool, &new_scheme("A", true), Some(1), None)
        .await
        .unwrap();
    let b = GradingSchemeRepo::create(&pool, &new_scheme("B", false), Some(1), None)
        .await
        .unwrap();

    let updated = GradingSchemeRepo::update(
        &pool,
        b.id,
        &UpdateGradingScheme {
            is_default: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert!(updated.is_default);
    let a = GradingSchemeRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert!(!a.is_default);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_is_none(pool: PgPool) {
    let result = GradingSchemeRepo::update(
        &pool,
        777,
        &UpdateGradingScheme {
            is_default: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_default_first(pool: PgPool) {
    GradingSchemeRepo::create(&pool, &new_scheme("Old", false), Some(1), None)
        .await
        .unwrap();
    let default = GradingSchemeRepo::create(&pool, &new_scheme("Default", true), Some(1), None)
        .await
        .unwrap();
    GradingSchemeRepo::create(&pool, &new_scheme("Newer", false), Some(1), None)
        .await
        .unwrap();
    GradingSchemeRepo::create(&pool, &new_scheme("Elsewhere", false), Some(2), None)
        .await
        .unwrap();

    let listed = GradingSchemeRepo::list(&pool, Some(1)).await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].id, default.id);

    let all = GradingSchemeRepo::list(&pool, None).await.unwrap();
    assert_eq!(all.len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_scheme(pool: PgPool) {
    let a = GradingSchemeRepo::create(&pool, &new_scheme("A", false), None, None)
        .await
        .unwrap();

    assert!(GradingSchemeRepo::delete(&pool, a.id).await.unwrap());
    assert!(!GradingSchemeRepo::delete(&pool, a.id).await.unwrap());
    assert!(GradingSchemeRepo::find_by_id(&pool, a.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_storage_rejects_second_default(pool: PgPool) {
    GradingSchemeRepo::create(&pool, &new_scheme("A", true), Some(9), None)
        .await
        .unwrap();

    let result = sqlx::query(
        "INSERT INTO grading_schemes (name, bands, is_default, campus_id) \
         VALUES ('Rogue', '{}'::jsonb, TRUE, 9)",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "partial unique index must reject a second default");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_storage_rejects_second_global_default(pool: PgPool) {
    GradingSchemeRepo::create(&pool, &new_scheme("A", true), None, None)
        .await
        .unwrap();

    let result = sqlx::query(
        "INSERT INTO grading_schemes (name, bands, is_default) \
         VALUES ('Rogue', '{}'::jsonb, TRUE)",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "global scope allows one default too");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_campus_zero_is_not_global_scope(pool: PgPool) {
    let global = GradingSchemeRepo::create(&pool, &new_scheme("Global", true), None, None)
        .await
        .unwrap();
    let zero = GradingSchemeRepo::create(&pool, &new_scheme("Zero", true), Some(0), None)
        .await
        .unwrap();
    assert!(zero.is_default);

    let other = GradingSchemeRepo::create(&pool, &new_scheme("Zero B", false), Some(0), None)
        .await
        .unwrap();
    GradingSchemeRepo::set_default(&pool, other.id).await.unwrap().unwrap();

    let global_default = GradingSchemeRepo::find_default(&pool, None).await.unwrap().unwrap();
    assert_eq!(global_default.id, global.id, "global default is untouched");
    let zero_default = GradingSchemeRepo::find_default(&pool, Some(0)).await.unwrap().unwrap();
    assert_eq!(zero_default.id, other.id);
    assert_eq!(count_defaults(&pool, Some(0)).await, 1);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_set_default_all_succeed(pool: PgPool) {
    GradingSchemeRepo::create(&pool, &new_scheme("Current", true), Some(1), None)
        .await
        .unwrap();
    let b = GradingSchemeRepo::create(&pool, &new_scheme("B", false), Some(1), None)
        .await
        .unwrap();
    let c = GradingSchemeRepo::create(&pool, &new_scheme("C", false), Some(1), None)
        .await
        .unwrap();

    for round in 0..20 {
        let (rb, rc) = tokio::join!(
            GradingSchemeRepo::set_default(&pool, b.id),
            GradingSchemeRepo::set_default(&pool, c.id),
        );
        assert!(rb.unwrap().is_some(), "round {round}: set_default(b) failed");
        assert!(rc.unwrap().is_some(), "round {round}: set_default(c) failed");
        assert_eq!(count_defaults(&pool, Some(1)).await, 1);
    }

    let default = GradingSchemeRepo::find_default(&pool, Some(1)).await.unwrap().unwrap();
    assert!(default.id == b.id || default.id == c.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_default_create_and_update(pool: PgPool) {
    let a = GradingSchemeRepo::create(&pool, &new_scheme("A", false), Some(2), None)
        .await
        .unwrap();

    for round in 0..10 {
        let promote = UpdateGradingScheme {
            is_default: Some(true),
            ..Default::default()
        };
        let name = format!("New {round}");
        let scheme = new_scheme(&name, true);
        let (created, updated) = tokio::join!(
            GradingSchemeRepo::create(&pool, &scheme, Some(2), None),
            GradingSchemeRepo::update(&pool, a.id, &promote),
        );
        created.unwrap();
        assert!(updated.unwrap().is_some());
        assert_eq!(count_defaults(&pool, Some(2)).await, 1);
    }
}
