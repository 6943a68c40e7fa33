//! Route definitions for the `/sessions` resource.
//!
//! Update and delete are reachable via POST as well as their semantic
//! verbs, because HTML forms behind the rendering layer can only POST.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::diary;
use crate::state::AppState;

/// ```text
/// GET    /sessions             -> list (+ stats)
/// POST   /sessions             -> create
/// GET    /sessions/{id}        -> get
/// POST   /sessions/{id}/update -> update
/// PUT    /sessions/{id}/update -> update
/// POST   /sessions/{id}/delete -> delete
/// DELETE /sessions/{id}/delete -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", get(diary::list).post(diary::create))
        .route("/sessions/{id}", get(diary::get))
        .route("/sessions/{id}/update", post(diary::update).put(diary::update))
        .route("/sessions/{id}/delete", post(diary::delete).delete(diary::delete))
}
