use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). The pool is constructed once in `main` and injected here;
/// no component reaches for a global connection handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hypnodiary_db::DbPool,
    /// Server configuration (accessed by the access gate and handlers).
    pub config: Arc<ServerConfig>,
}
