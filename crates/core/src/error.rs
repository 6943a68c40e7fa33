use crate::types::DbId;

/// Domain error taxonomy shared across the workspace.
///
/// The HTTP layer decides how each variant renders; nothing here knows
/// about status codes. Two variants carry deliberate information limits:
/// [`CoreError::AuthFailure`] never says whether the username or the
/// password was wrong, and [`CoreError::NotFound`] covers both a missing
/// row and a row owned by someone else.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Username is already taken")]
    DuplicateUsername,

    #[error("Invalid username or password")]
    AuthFailure,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Internal error: {0}")]
    Internal(String),
}
