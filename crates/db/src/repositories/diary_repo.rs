//! Repository for the `sessions` table (diary entries).
//!
//! Every query is owner-scoped: the owner id is a mandatory parameter
//! conjoined into the WHERE clause, so a guessed id belonging to another
//! user behaves exactly like a missing row.

use hypnodiary_core::links::normalize_video_link;
use hypnodiary_core::types::DbId;
use sqlx::PgPool;

use crate::models::diary::{CreateDiarySession, DiarySession, DiaryStats, UpdateDiarySession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, session_date, surname, given_name, session_kind, \
                        therapy_link, feedback_link, notes, created_at";

/// Provides owner-scoped CRUD for diary sessions.
pub struct DiaryRepo;

impl DiaryRepo {
    /// Insert a new diary session owned by `owner_id`, returning the row.
    ///
    /// Both link fields are canonicalized before they are persisted.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateDiarySession,
    ) -> Result<DiarySession, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions
                 (user_id, session_date, surname, given_name, session_kind,
                  therapy_link, feedback_link, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiarySession>(&query)
            .bind(owner_id)
            .bind(&input.session_date)
            .bind(&input.surname)
            .bind(&input.given_name)
            .bind(input.session_kind)
            .bind(normalize_video_link(&input.therapy_link))
            .bind(normalize_video_link(&input.feedback_link))
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// List the owner's diary newest-first (insertion order by id).
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<DiarySession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE user_id = $1 ORDER BY id DESC");
        sqlx::query_as::<_, DiarySession>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Aggregate counts over the owner's diary only, never the whole table.
    pub async fn stats_for_owner(pool: &PgPool, owner_id: DbId) -> Result<DiaryStats, sqlx::Error> {
        sqlx::query_as::<_, DiaryStats>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE session_kind = 'given_by_me') AS given_count,
                    COUNT(*) FILTER (WHERE session_kind = 'received_by_me') AS received_count
             FROM sessions
             WHERE user_id = $1",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await
    }

    /// Fetch one session. Returns `None` both when the id does not exist
    /// and when the row belongs to a different owner.
    pub async fn get(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<DiarySession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, DiarySession>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Patch a session. Only non-`None` fields are applied; link fields are
    /// re-canonicalized. A cross-owner id matches zero rows and comes back
    /// as `None`, indistinguishable from a missing row.
    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateDiarySession,
    ) -> Result<Option<DiarySession>, sqlx::Error> {
        let query = format!(
            "UPDATE sessions SET
                session_date = COALESCE($3, session_date),
                surname = COALESCE($4, surname),
                given_name = COALESCE($5, given_name),
                session_kind = COALESCE($6, session_kind),
                therapy_link = COALESCE($7, therapy_link),
                feedback_link = COALESCE($8, feedback_link),
                notes = COALESCE($9, notes)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiarySession>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.session_date)
            .bind(&input.surname)
            .bind(&input.given_name)
            .bind(input.session_kind)
            .bind(input.therapy_link.as_deref().map(normalize_video_link))
            .bind(input.feedback_link.as_deref().map(normalize_video_link))
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete one session. Returns `true` if a row owned by `owner_id` was
    /// removed; zero affected rows is the not-found case.
    pub async fn delete(pool: &PgPool, owner_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
