//! Shared harness for HTTP-level integration tests.
//!
//! Builds the real application router on a test database pool and drives
//! it in-process with `tower::ServiceExt::oneshot`, so the tests exercise
//! the same routing and extractors production uses without binding a
//! socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use hypnodiary_api::auth::token::AuthConfig;
use hypnodiary_api::config::ServerConfig;
use hypnodiary_api::routes;
use hypnodiary_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        auth: AuthConfig {
            session_ttl_hours: 168,
            password_min_length: 8,
        },
    }
}

/// Run migrations and build the application router on the given pool.
pub async fn build_test_app(pool: PgPool) -> Router {
    hypnodiary_db::run_migrations(&pool)
        .await
        .expect("migrations should run");

    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };

    routes::app_routes().with_state(state)
}

/// Issue a GET request without authentication.
pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Issue a GET request with a Bearer session token.
pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// POST a JSON body without authentication.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a JSON body with a Bearer session token using the given method.
pub async fn send_json_auth(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// POST a JSON body with a Bearer session token.
pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send_json_auth(app, Method::POST, uri, body, token).await
}

/// Issue a bodyless request with a Bearer session token.
pub async fn request_auth(app: &Router, method: Method, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Register a fresh user through the API and return its session token.
pub async fn register_user(app: &Router, username: &str) -> String {
    let body = serde_json::json!({
        "username": username,
        "password": "a-long-enough-password",
    });
    let response = post_json(app, "/register", body).await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::CREATED,
        "registration should succeed"
    );
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("registration must return a token")
        .to_string()
}
