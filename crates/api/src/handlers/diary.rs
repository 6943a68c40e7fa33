//! Handlers for the `/sessions` resource (the therapy-session diary).
//!
//! Every repository call takes its owner id from [`CurrentUser`]; client
//! input never chooses whose diary is touched. A record owned by someone
//! else is reported exactly like a missing one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hypnodiary_core::error::CoreError;
use hypnodiary_core::types::DbId;
use hypnodiary_db::models::diary::{
    CreateDiarySession, DiarySession, DiaryStats, UpdateDiarySession,
};
use hypnodiary_db::repositories::DiaryRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Diary listing payload: the owner's sessions plus aggregate counts.
#[derive(Debug, Serialize)]
pub struct DiaryListResponse {
    pub data: Vec<DiarySession>,
    pub stats: DiaryStats,
}

/// GET /sessions
///
/// List the caller's diary newest-first with aggregate counts computed
/// over the same owner-filtered set.
pub async fn list(
    user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<Json<DiaryListResponse>> {
    let sessions = DiaryRepo::list_for_owner(&state.pool, user.user_id).await?;
    let stats = DiaryRepo::stats_for_owner(&state.pool, user.user_id).await?;

    Ok(Json(DiaryListResponse {
        data: sessions,
        stats,
    }))
}

/// POST /sessions
///
/// Create a diary session owned by the caller. Link fields are
/// canonicalized before persistence.
pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDiarySession>,
) -> AppResult<(StatusCode, Json<DataResponse<DiarySession>>)> {
    let session = DiaryRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        user_id = user.user_id,
        session_id = session.id,
        "Diary session created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /sessions/{id}
pub async fn get(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DiarySession>>> {
    let session = DiaryRepo::get(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "session",
            id,
        }))?;

    Ok(Json(DataResponse { data: session }))
}

/// POST or PUT /sessions/{id}/update
///
/// Patch a diary session; link fields are re-canonicalized. Zero affected
/// rows (missing or not owned) reports as 404.
pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDiarySession>,
) -> AppResult<Json<DataResponse<DiarySession>>> {
    let session = DiaryRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "session",
            id,
        }))?;

    Ok(Json(DataResponse { data: session }))
}

/// POST or DELETE /sessions/{id}/delete
///
/// Delete a diary session. Returns 204, or 404 for missing-or-not-owned.
pub async fn delete(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DiaryRepo::delete(&state.pool, user.user_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "session",
            id,
        }));
    }

    tracing::info!(user_id = user.user_id, session_id = id, "Diary session deleted");

    Ok(StatusCode::NO_CONTENT)
}
