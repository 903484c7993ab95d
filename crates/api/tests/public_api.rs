//! Integration tests for the unauthenticated surface: health check, sitemap
//! and the public home endpoints.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{body_json, get};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// The health endpoint reports service and database status.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_check(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}

/// The sitemap serves XML with the static pages and per-car URLs.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sitemap_lists_static_and_car_pages(pool: PgPool) {
    sqlx::query("INSERT INTO cars (name, slug) VALUES ('Fortuner', 'fortuner')")
        .execute(&pool)
        .await
        .expect("car insert should succeed");

    let app = common::build_test_app(pool);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/sitemap.xml")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/xml")
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let xml = String::from_utf8(body.to_vec()).expect("sitemap should be UTF-8");
    assert!(xml.contains("<urlset"));
    assert!(xml.contains("<loc>http://localhost:5173/</loc>"));
    assert!(xml.contains("<loc>http://localhost:5173/mobil/fortuner</loc>"));
}

/// Soft-deleted cars drop out of the sitemap.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sitemap_skips_deleted_cars(pool: PgPool) {
    sqlx::query(
        "INSERT INTO cars (name, slug, deleted_at) VALUES ('Gone', 'gone--deleted-1', NOW())",
    )
    .execute(&pool)
    .await
    .expect("car insert should succeed");

    let app = common::build_test_app(pool);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/sitemap.xml")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let xml = String::from_utf8(body.to_vec()).expect("sitemap should be UTF-8");
    assert!(!xml.contains("gone"));
}

/// The public home endpoints answer without a token, empty database included.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_home_endpoints_need_no_token(pool: PgPool) {
    for uri in [
        "/api/v1/cars/getHomeList",
        "/api/v1/cars/list",
        "/api/v1/promos/getHomeList",
        "/api/v1/carousels/getHomeList",
        "/api/v1/comments/getHomeList",
        "/api/v1/certificates",
    ] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri} should be public");

        let json = body_json(response).await;
        assert_eq!(json["status"], true, "GET {uri} should use the envelope");
        assert_eq!(
            json["data"].as_array().map(Vec::len),
            Some(0),
            "GET {uri} should return an empty list"
        );
    }
}

/// Unknown routes fall through to a plain 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_route(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/nonexistent").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
