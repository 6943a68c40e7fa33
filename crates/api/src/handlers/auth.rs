//! Handlers for registration, login, and logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hypnodiary_core::error::CoreError;
use hypnodiary_core::types::Timestamp;
use hypnodiary_db::models::auth_session::CreateAuthSession;
use hypnodiary_db::models::user::{CreateUser, User, UserResponse};
use hypnodiary_db::repositories::{AuthSessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::token::generate_session_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Opaque session token; send it back as `Authorization: Bearer <token>`.
    pub token: String,
    pub expires_at: Timestamp,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register
///
/// Create a new account and log it in immediately. Returns 201 with a
/// fresh session token, or 409 when the username is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let username = input.username.trim();
    if username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be empty".into(),
        )));
    }
    validate_password_strength(&input.password, state.config.auth.password_min_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        username: username.to_string(),
        password_hash,
    };

    // The unique constraint is authoritative: a lost race shows up here as
    // a duplicate-key violation, not in a prior existence check.
    let user = match UserRepo::create(&state.pool, &create).await {
        Ok(user) => user,
        Err(e) if hypnodiary_db::is_unique_violation(&e) => {
            return Err(AppError::Core(CoreError::DuplicateUsername));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, "Registered new user");

    let response = create_auth_response(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /login
///
/// Authenticate with username + password. Returns a fresh session token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // Unknown usernames and wrong passwords collapse into one outcome so
    // this endpoint cannot be used to enumerate accounts.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or(AppError::Core(CoreError::AuthFailure))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::AuthFailure));
    }

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /logout
///
/// Destroy the presented session. Other concurrent sessions of the same
/// user stay active. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, user: CurrentUser) -> AppResult<StatusCode> {
    AuthSessionRepo::revoke(&state.pool, user.session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate a session token, persist the session row, and build the
/// response handed to the client.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let (token, token_hash) = generate_session_token();

    let expires_at = Utc::now() + chrono::Duration::hours(state.config.auth.session_ttl_hours);

    let session_input = CreateAuthSession {
        user_id: user.id,
        token_hash,
        expires_at,
    };
    AuthSessionRepo::create(&state.pool, &session_input).await?;

    Ok(AuthResponse {
        token,
        expires_at,
        user: UserResponse::from(user),
    })
}
