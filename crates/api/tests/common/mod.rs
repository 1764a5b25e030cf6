//! Shared helpers for API integration tests.
//!
//! Builds the real application router (same middleware stack as production)
//! on top of a per-test database, plus seeding and request helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use corkboard_api::auth::jwt::{generate_access_token, JwtConfig};
use corkboard_api::auth::password::hash_password;
use corkboard_api::config::ServerConfig;
use corkboard_api::router::build_app_router;
use corkboard_api::state::AppState;
use corkboard_db::models::note::Note;
use corkboard_db::models::user::User;
use corkboard_db::repositories::{BoardRepo, NoteRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };
    build_app_router(state)
}

/// Mint a valid Bearer token for the given user id.
pub fn token_for(user_id: i64) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

/// Create a user with a real Argon2id password hash.
pub async fn seed_user(pool: &PgPool, email: &str, name: Option<&str>) -> User {
    let hash = hash_password("test-password-123").expect("hashing should succeed");
    UserRepo::create(pool, email, name, &hash)
        .await
        .expect("user creation should succeed")
}

/// Create a board owned by `owner_id` and a note on it.
pub async fn seed_note(pool: &PgPool, owner_id: i64, title: &str) -> Note {
    let board = BoardRepo::create(pool, owner_id, &format!("{title} board"))
        .await
        .expect("board creation should succeed");
    NoteRepo::create(pool, board.id, title)
        .await
        .expect("note creation should succeed")
}

/// Send a request through the router. `token` adds a Bearer header, `body`
/// is sent as JSON.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };
    app.clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::GET, uri, token, None).await
}

pub async fn put_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> Response {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn post_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> Response {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::DELETE, uri, token, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
