//! Auth session model and DTOs.

use hypnodiary_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// An authenticated login row from the `auth_sessions` table.
///
/// The client holds only the opaque plaintext token; this row stores its
/// SHA-256 digest so a database leak does not compromise active logins.
#[derive(Debug, Clone, FromRow)]
pub struct AuthSession {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new auth session.
pub struct CreateAuthSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
