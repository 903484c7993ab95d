//! Shared helpers for HTTP-level integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use showroom_api::auth::jwt::{generate_access_token, JwtConfig};
use showroom_api::auth::password::hash_password;
use showroom_api::config::ServerConfig;
use showroom_api::router::build_app_router;
use showroom_api::state::AppState;
use showroom_core::types::DbId;
use showroom_db::repositories::UserRepo;

/// Fixed multipart boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uploads land in a per-process temp directory so tests never touch the
/// real upload tree.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        base_url: "http://localhost:3000".to_string(),
        site_base_url: "http://localhost:5173".to_string(),
        upload_dir: std::env::temp_dir()
            .join(format!("showroom-test-uploads-{}", std::process::id()))
            .to_string_lossy()
            .into_owned(),
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Mirrors the router construction in `main.rs` so integration tests exercise
/// the same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };
    build_app_router(state)
}

/// Create a user directly in the database and return its id.
///
/// `role_name` assigns one of the seeded roles (`admin`, `editor`); `None`
/// leaves the user without any role.
pub async fn seed_user(pool: &PgPool, username: &str, role_name: Option<&str>) -> DbId {
    let hashed = hash_password(test_password()).expect("hashing should succeed");
    let user = UserRepo::create(pool, username, &format!("{username}@test.com"), &hashed)
        .await
        .expect("user creation should succeed");

    if let Some(role) = role_name {
        let role_id = UserRepo::role_id_by_name(pool, role)
            .await
            .expect("role lookup should succeed")
            .unwrap_or_else(|| panic!("role '{role}' should be seeded"));
        UserRepo::assign_role(pool, user.id, role_id)
            .await
            .expect("role assignment should succeed");
    }

    user.id
}

/// The plaintext password every seeded user gets.
pub fn test_password() -> &'static str {
    "integration-pass-123!"
}

/// Mint a valid access token for a seeded user, with that user's roles.
pub async fn token_for(pool: &PgPool, user_id: DbId) -> String {
    let role_ids = UserRepo::role_ids(pool, user_id)
        .await
        .expect("role lookup should succeed");
    generate_access_token(user_id, &role_ids, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Seed an admin user and return a token for it.
pub async fn admin_token(pool: &PgPool) -> String {
    let id = seed_user(pool, "it_admin", Some("admin")).await;
    token_for(pool, id).await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST a hand-built multipart body (see [`multipart_body`]).
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    body: Vec<u8>,
    token: &str,
) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// PUT a hand-built multipart body (see [`multipart_body`]).
pub async fn put_multipart_auth(
    app: Router,
    uri: &str,
    body: Vec<u8>,
    token: &str,
) -> Response {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Assemble a multipart body from text fields and file parts.
///
/// Each file is `(part_name, filename, mime, bytes)`.
pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    for (name, filename, mime, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {mime}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
