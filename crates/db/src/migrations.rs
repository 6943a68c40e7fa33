//! Ordered startup migrations.
//!
//! The schema is evolved by an explicit list of idempotent steps executed
//! in order on every process start. Plain DDL steps carry `IF NOT EXISTS`
//! guards; the ownership-column step probes `information_schema` first and
//! tolerates the duplicate-column error a concurrently starting instance
//! may produce, so several instances can race through startup safely.

use sqlx::PgPool;

const CREATE_USERS: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )";

const CREATE_SESSIONS: &str = "
    CREATE TABLE IF NOT EXISTS sessions (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT REFERENCES users(id),
        session_date TEXT NOT NULL DEFAULT '',
        surname TEXT NOT NULL DEFAULT '',
        given_name TEXT NOT NULL DEFAULT '',
        session_kind TEXT NOT NULL
            CHECK (session_kind IN ('given_by_me', 'received_by_me')),
        therapy_link TEXT NOT NULL DEFAULT '',
        feedback_link TEXT NOT NULL DEFAULT '',
        notes TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )";

const CREATE_AUTH_SESSIONS: &str = "
    CREATE TABLE IF NOT EXISTS auth_sessions (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id),
        token_hash TEXT NOT NULL UNIQUE,
        expires_at TIMESTAMPTZ NOT NULL,
        is_revoked BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )";

/// Run all schema migrations in order.
///
/// Safe to call on every startup and from concurrent instances; a second
/// run is a no-op.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_USERS).execute(pool).await?;
    sqlx::query(CREATE_SESSIONS).execute(pool).await?;
    add_sessions_owner_column(pool).await?;
    sqlx::query(CREATE_AUTH_SESSIONS).execute(pool).await?;
    Ok(())
}

/// Add `sessions.user_id` to a table created before ownership tracking.
///
/// Rows that already exist keep a NULL owner: they stop being reachable
/// through the owner-scoped queries and need a manual backfill to be
/// claimed. The WARN on alteration makes that visible instead of silent.
async fn add_sessions_owner_column(pool: &PgPool) -> Result<(), sqlx::Error> {
    let column: Option<(i32,)> = sqlx::query_as(
        "SELECT 1 FROM information_schema.columns
         WHERE table_name = 'sessions' AND column_name = 'user_id'",
    )
    .fetch_optional(pool)
    .await?;

    if column.is_some() {
        return Ok(());
    }

    match sqlx::query("ALTER TABLE sessions ADD COLUMN user_id BIGINT REFERENCES users(id)")
        .execute(pool)
        .await
    {
        Ok(_) => {
            tracing::warn!(
                "added sessions.user_id; pre-existing rows have a NULL owner \
                 and are not reachable until backfilled"
            );
            Ok(())
        }
        // Another instance won the race between the probe and the ALTER.
        Err(e) if is_duplicate_column(&e) => Ok(()),
        Err(e) => Err(e),
    }
}

/// True when `err` is PostgreSQL `duplicate_column` (42701).
fn is_duplicate_column(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("42701"))
}
