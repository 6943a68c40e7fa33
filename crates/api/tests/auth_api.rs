//! HTTP-level integration tests for registration, login, and logout.

mod common;

use axum::http::{header, StatusCode};
use sqlx::PgPool;

/// Registration returns 201 with a token that is immediately usable.
#[sqlx::test]
async fn test_register_creates_account_and_session(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let body = serde_json::json!({ "username": "alice", "password": "correct-horse-battery" });
    let response = common::post_json(&app, "/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = common::body_json(response).await;
    assert!(json["token"].is_string(), "response must contain a token");
    assert!(json["expires_at"].is_string(), "response must contain expires_at");
    assert_eq!(json["user"]["username"], "alice");

    let token = json["token"].as_str().unwrap();
    let response = common::get_auth(&app, "/sessions", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Registering the same username twice fails with 409 on the second attempt.
#[sqlx::test]
async fn test_register_duplicate_username(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let body = serde_json::json!({ "username": "alice", "password": "a-long-enough-password" });
    let response = common::post_json(&app, "/register", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = common::post_json(&app, "/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "DUPLICATE_USERNAME");
}

/// Empty usernames and short passwords are rejected up front.
#[sqlx::test]
async fn test_register_validates_input(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let body = serde_json::json!({ "username": "   ", "password": "a-long-enough-password" });
    let response = common::post_json(&app, "/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "username": "alice", "password": "short" });
    let response = common::post_json(&app, "/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// Login with correct credentials returns a usable token.
#[sqlx::test]
async fn test_login_success(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    common::register_user(&app, "alice").await;

    let body = serde_json::json!({ "username": "alice", "password": "a-long-enough-password" });
    let response = common::post_json(&app, "/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    let token = json["token"].as_str().expect("login must return a token");

    let response = common::get_auth(&app, "/sessions", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// A wrong password and an unknown username produce the same failure: the
/// response never discloses which half was wrong.
#[sqlx::test]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    common::register_user(&app, "alice").await;

    let wrong_password = common::post_json(
        &app,
        "/login",
        serde_json::json!({ "username": "alice", "password": "not-her-password" }),
    )
    .await;
    let unknown_user = common::post_json(
        &app,
        "/login",
        serde_json::json!({ "username": "ghost", "password": "whatever-at-all" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let a = common::body_json(wrong_password).await;
    let b = common::body_json(unknown_user).await;
    assert_eq!(a, b, "both failures must carry the identical body");
}

/// A user may hold several live sessions at once; each token works.
#[sqlx::test]
async fn test_concurrent_sessions(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let first = common::register_user(&app, "alice").await;

    let body = serde_json::json!({ "username": "alice", "password": "a-long-enough-password" });
    let response = common::post_json(&app, "/login", body).await;
    let second = common::body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    assert_ne!(first, second);
    for token in [&first, &second] {
        let response = common::get_auth(&app, "/sessions", token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

/// Logout destroys the presented session: the old token then redirects to
/// login, while a sibling session stays alive.
#[sqlx::test]
async fn test_logout_destroys_only_presented_session(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let first = common::register_user(&app, "alice").await;

    let body = serde_json::json!({ "username": "alice", "password": "a-long-enough-password" });
    let response = common::post_json(&app, "/login", body).await;
    let second = common::body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response =
        common::request_auth(&app, axum::http::Method::POST, "/logout", &first).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The destroyed token is now worthless.
    let response = common::get_auth(&app, "/sessions", &first).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");

    // The sibling session is untouched.
    let response = common::get_auth(&app, "/sessions", &second).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Requests without any token are sent to the login flow, not an error page.
#[sqlx::test]
async fn test_missing_token_redirects_to_login(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = common::get(&app, "/sessions").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");

    let response = common::post_json(&app, "/sessions", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

/// A syntactically valid but unknown token behaves like no token at all.
#[sqlx::test]
async fn test_unknown_token_redirects_to_login(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response =
        common::get_auth(&app, "/sessions", "00000000-0000-4000-8000-000000000000").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}
