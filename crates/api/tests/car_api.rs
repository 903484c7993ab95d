//! HTTP-level integration tests for the car endpoints, covering the
//! multi-step create and the public detail payload.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, get, multipart_body, post_multipart_auth};
use showroom_db::repositories::TagRepo;
use sqlx::PgPool;

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

/// Create a car with tags, variants and an upload, then fetch its public
/// detail by slug and check the assembled payload.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_car_and_fetch_detail(pool: PgPool) {
    let token = admin_token(&pool).await;
    let tag = TagRepo::create(&pool, "SUV", "suv")
        .await
        .expect("tag creation should succeed");

    let tags_json = format!("[{}]", tag.id);
    let variants_json =
        r#"[{"name":"1.5 G CVT","price":250000000},{"name":"1.5 V CVT","price":285000000}]"#;
    let body = multipart_body(
        &[
            ("name", "Alphard"),
            ("slug", "alphard"),
            ("description", "Luxury MPV"),
            ("tags", &tags_json),
            ("variants", variants_json),
        ],
        &[("media", "front.jpg", "image/jpeg", JPEG_BYTES)],
    );

    let app = common::build_test_app(pool.clone());
    let response = post_multipart_auth(app, "/api/v1/cars/create", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Car created successfully");
    assert_eq!(json["data"]["slug"], "alphard");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/cars/detail/alphard").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let detail = &json["data"];
    assert_eq!(detail["name"], "Alphard");
    assert_eq!(detail["tags"][0]["slug"], "suv");
    assert_eq!(detail["variants"].as_array().map(Vec::len), Some(2));
    assert_eq!(detail["variants"][0]["name"], "1.5 G CVT");
    assert_eq!(detail["mediaFiles"].as_array().map(Vec::len), Some(1));
    assert_eq!(detail["testimonials"].as_array().map(Vec::len), Some(0));
}

/// Car creation enforces the MIME allow-list on uploads.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_disallowed_mime(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = multipart_body(
        &[("name", "Avanza"), ("slug", "avanza")],
        &[("media", "brochure.pdf", "application/pdf", b"%PDF-1.4")],
    );
    let response = post_multipart_auth(app, "/api/v1/cars/create", body, &token).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["media"][0], "File type is not allowed");
}

/// Car creation requires at least one upload.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_requires_media(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = multipart_body(&[("name", "Raize"), ("slug", "raize")], &[]);
    let response = post_multipart_auth(app, "/api/v1/cars/create", body, &token).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["media"][0], "At least one media file is required");
}

/// A page field holding only empty markup is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_empty_rich_text_page(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = multipart_body(
        &[
            ("name", "Yaris"),
            ("slug", "yaris"),
            ("page", "<p>  </p><div></div>"),
        ],
        &[("media", "front.jpg", "image/jpeg", JPEG_BYTES)],
    );
    let response = post_multipart_auth(app, "/api/v1/cars/create", body, &token).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["page"][0], "The page field must contain content");
}

/// An unknown slug is a 404 with the entity name in the message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_detail_unknown_slug(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/cars/detail/no-such-car").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Car not found");
}

/// The public catalog list carries the price range per car.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_catalog_list_reports_price_range(pool: PgPool) {
    let token = admin_token(&pool).await;

    let variants_json = r#"[{"name":"Base","price":100000000},{"name":"Top","price":150000000}]"#;
    let body = multipart_body(
        &[("name", "Camry"), ("slug", "camry"), ("variants", variants_json)],
        &[("media", "front.jpg", "image/jpeg", JPEG_BYTES)],
    );
    let app = common::build_test_app(pool.clone());
    let response = post_multipart_auth(app, "/api/v1/cars/create", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/cars/list").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let car = &json["data"][0];
    assert_eq!(car["slug"], "camry");
    assert_eq!(car["minPrice"], 100000000.0);
    assert_eq!(car["maxPrice"], 150000000.0);
    assert_eq!(car["totalVariants"], 2);
}
