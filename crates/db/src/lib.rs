//! Database layer: pool construction, startup migrations, models, and
//! repositories.
//!
//! The pool is built once in `main` and handed to components through
//! application state; nothing in this crate holds global connection state.

use sqlx::postgres::PgPoolOptions;

pub mod migrations;
pub mod models;
pub mod repositories;

pub use migrations::run_migrations;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// True when `err` is a PostgreSQL unique-constraint violation (23505).
///
/// Callers that treat a unique constraint as authoritative (username
/// registration) match on this instead of pre-checking for existence.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}
