//! HTTP-level integration tests for the carousel endpoints, which exercise
//! the multipart upload path.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, delete_auth, get, multipart_body, post_multipart_auth,
    put_multipart_auth,
};
use sqlx::PgPool;

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

/// Creating a carousel stores the upload and returns its public URL.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_carousel_with_upload(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = multipart_body(
        &[("name", "Summer banner"), ("link", "/promo/summer")],
        &[("media", "banner.jpg", "image/jpeg", JPEG_BYTES)],
    );
    let response = post_multipart_auth(app, "/api/v1/carousels/create", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Carousel created successfully");
    assert_eq!(json["data"]["name"], "Summer banner");
    assert_eq!(json["data"]["link"], "/promo/summer");
    assert_eq!(json["data"]["mediaType"], "image");
    let url = json["data"]["mediaUrl"].as_str().expect("mediaUrl must be a string");
    assert!(
        url.contains("/uploads/media-"),
        "stored URL should point at the uploads dir, got: {url}"
    );
}

/// A create without any file part is a field error, not a 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_without_file_is_validation_error(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = multipart_body(&[("name", "No file")], &[]);
    let response = post_multipart_auth(app, "/api/v1/carousels/create", body, &token).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["media"][0], "The media file is required");
}

/// A missing name field is reported against the name key.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_without_name_is_validation_error(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = multipart_body(&[], &[("media", "banner.jpg", "image/jpeg", JPEG_BYTES)]);
    let response = post_multipart_auth(app, "/api/v1/carousels/create", body, &token).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["name"][0], "The name field is required");
}

/// Uploads above the 10MB cap are rejected per file.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_oversized_upload_rejected(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let oversized = vec![0u8; 10 * 1024 * 1024 + 1];
    let body = multipart_body(
        &[("name", "Too big")],
        &[("media", "big.jpg", "image/jpeg", &oversized)],
    );
    let response = post_multipart_auth(app, "/api/v1/carousels/create", body, &token).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["media"][0], "File size must not exceed 10MB");
}

/// Update without a new file keeps the stored media.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_without_file_keeps_media(pool: PgPool) {
    let token = admin_token(&pool).await;

    let body = multipart_body(
        &[("name", "Original")],
        &[("media", "banner.jpg", "image/jpeg", JPEG_BYTES)],
    );
    let app = common::build_test_app(pool.clone());
    let response = post_multipart_auth(app, "/api/v1/carousels/create", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().expect("id must be a number");
    let original_url = created["data"]["mediaUrl"].as_str().unwrap().to_string();

    let id_text = id.to_string();
    let body = multipart_body(&[("id", &id_text), ("name", "Renamed")], &[]);
    let app = common::build_test_app(pool);
    let response = put_multipart_auth(app, "/api/v1/carousels", body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Carousel updated successfully");
    assert_eq!(json["data"]["name"], "Renamed");
    assert_eq!(json["data"]["mediaUrl"], original_url.as_str());
}

/// Deleted carousels vanish from the public home list.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_deleted_carousel_leaves_home_list(pool: PgPool) {
    let token = admin_token(&pool).await;

    let body = multipart_body(
        &[("name", "Ephemeral")],
        &[("media", "banner.jpg", "image/jpeg", JPEG_BYTES)],
    );
    let app = common::build_test_app(pool.clone());
    let response = post_multipart_auth(app, "/api/v1/carousels/create", body, &token).await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().expect("id must be a number");

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/carousels/getHomeList").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(1));

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/carousels/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/carousels/getHomeList").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(0));
}
