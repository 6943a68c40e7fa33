//! Bootstrap tests: startup migrations and schema evolution.

use sqlx::PgPool;

/// Running the migration list twice must be a no-op.
#[sqlx::test]
async fn test_migrations_are_idempotent(pool: PgPool) {
    hypnodiary_db::run_migrations(&pool)
        .await
        .expect("first run should succeed");
    hypnodiary_db::run_migrations(&pool)
        .await
        .expect("second run should succeed");

    hypnodiary_db::health_check(&pool).await.unwrap();

    for table in ["users", "sessions", "auth_sessions"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should exist and be empty");
    }
}

/// A `sessions` table created before ownership tracking gains a `user_id`
/// column; its pre-existing rows keep a NULL owner and stay invisible to
/// every owner-scoped query.
#[sqlx::test]
async fn test_ownership_column_added_to_legacy_table(pool: PgPool) {
    sqlx::query(
        "CREATE TABLE sessions (
            id BIGSERIAL PRIMARY KEY,
            session_date TEXT NOT NULL DEFAULT '',
            surname TEXT NOT NULL DEFAULT '',
            given_name TEXT NOT NULL DEFAULT '',
            session_kind TEXT NOT NULL,
            therapy_link TEXT NOT NULL DEFAULT '',
            feedback_link TEXT NOT NULL DEFAULT '',
            notes TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO sessions (session_kind) VALUES ('given_by_me')")
        .execute(&pool)
        .await
        .unwrap();

    hypnodiary_db::run_migrations(&pool)
        .await
        .expect("migrations should evolve the legacy table");

    // The column exists now and the legacy row was not deleted.
    let orphaned: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE user_id IS NULL")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(orphaned.0, 1, "legacy row should survive with a NULL owner");

    // No owner can see it.
    let user = hypnodiary_db::repositories::UserRepo::create(
        &pool,
        &hypnodiary_db::models::user::CreateUser {
            username: "late_arrival".into(),
            password_hash: "irrelevant".into(),
        },
    )
    .await
    .unwrap();

    let listed = hypnodiary_db::repositories::DiaryRepo::list_for_owner(&pool, user.id)
        .await
        .unwrap();
    assert!(listed.is_empty(), "NULL-owned rows must not be listed");
}
