//! Session-token authentication extractor for Axum handlers.
//!
//! This extractor is the only place a request gets bound to a user id:
//! diary handlers take the owner id from [`CurrentUser`] and never from
//! request input.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hypnodiary_core::error::CoreError;
use hypnodiary_core::types::DbId;
use hypnodiary_db::repositories::AuthSessionRepo;

use crate::auth::token::hash_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller resolved from a Bearer session token.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// A missing, unknown, revoked, or expired token rejects with
/// [`CoreError::Unauthenticated`], which renders as a redirect to `/login`
/// rather than an error page.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The caller's user id; the mandatory owner id for diary queries.
    pub user_id: DbId,
    /// The auth session backing this request (revoked on logout).
    pub session_id: DbId,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Core(CoreError::Unauthenticated))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Core(CoreError::Unauthenticated))?;

        let token_hash = hash_session_token(token);
        let session = AuthSessionRepo::find_active_by_token_hash(&state.pool, &token_hash)
            .await?
            .ok_or(AppError::Core(CoreError::Unauthenticated))?;

        Ok(CurrentUser {
            user_id: session.user_id,
            session_id: session.id,
        })
    }
}
