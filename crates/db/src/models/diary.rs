//! Diary session model and DTOs.
//!
//! A diary session is a logged therapy session (the domain entity), not an
//! authenticated login -- see [`crate::models::auth_session`] for those.

use hypnodiary_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Whether the owner gave the session or received it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum SessionKind {
    GivenByMe,
    ReceivedByMe,
}

/// Full diary session row from the `sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiarySession {
    pub id: DbId,
    /// Owning user. NULL only on rows that predate ownership tracking;
    /// such rows never satisfy the owner-scoped queries.
    #[serde(skip)]
    pub user_id: Option<DbId>,
    pub session_date: String,
    pub surname: String,
    pub given_name: String,
    pub session_kind: SessionKind,
    pub therapy_link: String,
    pub feedback_link: String,
    pub notes: String,
    pub created_at: Timestamp,
}

/// DTO for creating a diary session. Link fields are canonicalized by the
/// repository before insert; everything except the kind may be empty.
#[derive(Debug, Deserialize)]
pub struct CreateDiarySession {
    #[serde(default)]
    pub session_date: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub given_name: String,
    pub session_kind: SessionKind,
    #[serde(default)]
    pub therapy_link: String,
    #[serde(default)]
    pub feedback_link: String,
    #[serde(default)]
    pub notes: String,
}

/// DTO for updating a diary session. Only non-`None` fields are applied;
/// link fields are re-canonicalized when present.
#[derive(Debug, Deserialize)]
pub struct UpdateDiarySession {
    pub session_date: Option<String>,
    pub surname: Option<String>,
    pub given_name: Option<String>,
    pub session_kind: Option<SessionKind>,
    pub therapy_link: Option<String>,
    pub feedback_link: Option<String>,
    pub notes: Option<String>,
}

/// Aggregate counts over a single owner's diary, returned alongside the
/// listing. The CHECK constraint on `session_kind` keeps
/// `total == given_count + received_count`.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct DiaryStats {
    pub total: i64,
    pub given_count: i64,
    pub received_count: i64,
}
