//! Route tree assembly.

pub mod auth;
pub mod diary;
pub mod health;

use axum::response::Redirect;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// /                       redirect to /sessions
/// /health                 liveness + db ping
///
/// /register               create account + session (public)
/// /login                  create session (public)
/// /logout                 destroy session (requires auth)
///
/// /sessions               list + stats (GET), create (POST)
/// /sessions/{id}          get one (GET)
/// /sessions/{id}/update   update one (POST or PUT)
/// /sessions/{id}/delete   delete one (POST or DELETE)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/sessions") }))
        .merge(health::router())
        .merge(auth::router())
        .merge(diary::router())
}
