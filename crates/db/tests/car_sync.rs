//! Car update reconciliation and the merged promo list.

use chrono::{Duration, Utc};
use showroom_db::models::car::{CarFields, NewCar, NewMediaFile, VariantInput};
use showroom_db::models::promo::NewPromo;
use showroom_db::repositories::{CarRepo, PromoRepo, TagRepo};
use sqlx::PgPool;

fn new_car(name: &str, slug: &str) -> NewCar {
    NewCar {
        name: name.to_string(),
        slug: slug.to_string(),
        description: String::new(),
        page: "<p>body</p>".to_string(),
    }
}

fn fields(name: &str, slug: &str) -> CarFields {
    CarFields {
        name: name.to_string(),
        slug: slug.to_string(),
        description: String::new(),
        page: "<p>body</p>".to_string(),
    }
}

fn variant(id: Option<i64>, name: &str, price: f64) -> VariantInput {
    VariantInput {
        id,
        name: name.to_string(),
        price,
    }
}

fn new_promo(name: &str, slug: &str, is_global: bool) -> NewPromo {
    let now = Utc::now();
    NewPromo {
        name: name.to_string(),
        slug: slug.to_string(),
        start_date: now,
        end_date: now + Duration::days(30),
        page: String::new(),
        media_url: "/uploads/promo.jpg".to_string(),
        media_type: "image".to_string(),
        is_global,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn variant_reconciliation_follows_optional_ids(pool: PgPool) {
    let car = CarRepo::create(
        &pool,
        new_car("Civic", "civic"),
        &[],
        &[variant(None, "RS", 400.0), variant(None, "E", 350.0)],
        &[],
    )
    .await
    .unwrap();

    let detail = CarRepo::edit_detail(&pool, car.id).await.unwrap().unwrap();
    assert_eq!(detail.variants.len(), 2);
    let rs_id = detail.variants.iter().find(|v| v.name == "RS").unwrap().id;

    // Keep RS (renamed, repriced), drop E, add one new variant.
    CarRepo::update(
        &pool,
        car.id,
        fields("Civic", "civic"),
        &[],
        vec![
            variant(Some(rs_id), "RS Turbo", 450.0),
            variant(None, "Hybrid", 500.0),
        ],
        &[],
        &[],
    )
    .await
    .unwrap()
    .unwrap();

    let detail = CarRepo::edit_detail(&pool, car.id).await.unwrap().unwrap();
    assert_eq!(detail.variants.len(), 2);

    let rs = detail.variants.iter().find(|v| v.id == rs_id).unwrap();
    assert_eq!(rs.name, "RS Turbo");
    assert_eq!(rs.price, 450.0);
    assert!(detail.variants.iter().any(|v| v.name == "Hybrid"));
    assert!(!detail.variants.iter().any(|v| v.name == "E"));
}

#[sqlx::test(migrations = "./migrations")]
async fn tag_links_are_diff_synced(pool: PgPool) {
    let a = TagRepo::create(&pool, "SUV", "suv").await.unwrap();
    let b = TagRepo::create(&pool, "MPV", "mpv").await.unwrap();
    let c = TagRepo::create(&pool, "Sedan", "sedan").await.unwrap();

    let car = CarRepo::create(&pool, new_car("CR-V", "cr-v"), &[a.id, b.id], &[], &[])
        .await
        .unwrap();

    CarRepo::update(
        &pool,
        car.id,
        fields("CR-V", "cr-v"),
        &[b.id, c.id],
        vec![],
        &[],
        &[],
    )
    .await
    .unwrap()
    .unwrap();

    let detail = CarRepo::edit_detail(&pool, car.id).await.unwrap().unwrap();
    let mut tag_ids = detail.tag_ids.clone();
    tag_ids.sort();
    let mut expected = vec![b.id, c.id];
    expected.sort();
    assert_eq!(tag_ids, expected);
}

#[sqlx::test(migrations = "./migrations")]
async fn media_sync_keeps_listed_rows_and_appends_uploads(pool: PgPool) {
    let car = CarRepo::create(
        &pool,
        new_car("Jazz", "jazz"),
        &[],
        &[],
        &[
            NewMediaFile {
                url: "/uploads/a.jpg".to_string(),
                media_type: "image".to_string(),
            },
            NewMediaFile {
                url: "/uploads/b.jpg".to_string(),
                media_type: "image".to_string(),
            },
        ],
    )
    .await
    .unwrap();

    let detail = CarRepo::edit_detail(&pool, car.id).await.unwrap().unwrap();
    let keep = detail
        .media_files
        .iter()
        .find(|m| m.url == "/uploads/a.jpg")
        .unwrap()
        .id;

    CarRepo::update(
        &pool,
        car.id,
        fields("Jazz", "jazz"),
        &[],
        vec![],
        &[keep],
        &[NewMediaFile {
            url: "/uploads/c.mp4".to_string(),
            media_type: "video".to_string(),
        }],
    )
    .await
    .unwrap()
    .unwrap();

    let detail = CarRepo::edit_detail(&pool, car.id).await.unwrap().unwrap();
    let urls: Vec<&str> = detail.media_files.iter().map(|m| m.url.as_str()).collect();
    assert_eq!(urls, vec!["/uploads/a.jpg", "/uploads/c.mp4"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn car_detail_merges_linked_and_global_promos_without_duplicates(pool: PgPool) {
    let car = CarRepo::create(&pool, new_car("HR-V", "hr-v"), &[], &[], &[])
        .await
        .unwrap();

    // Linked promo that is also global: must appear once, from the linked set.
    let both = PromoRepo::create(&pool, new_promo("Trade-in", "trade-in", true), &[car.id])
        .await
        .unwrap();
    let linked_only = PromoRepo::create(&pool, new_promo("Cashback", "cashback", false), &[car.id])
        .await
        .unwrap();
    let global_only = PromoRepo::create(&pool, new_promo("Year End", "year-end", true), &[])
        .await
        .unwrap();
    // Neither linked nor global: invisible on the detail page.
    PromoRepo::create(&pool, new_promo("Other", "other", false), &[])
        .await
        .unwrap();

    let detail = CarRepo::detail_by_slug(&pool, "hr-v").await.unwrap().unwrap();
    let ids: Vec<i64> = detail.promos.iter().map(|p| p.id).collect();

    assert_eq!(ids.len(), 3);
    // No duplicates.
    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), 3);
    // Linked promos come first, globals are appended.
    assert!(ids.contains(&both.id));
    assert!(ids.contains(&linked_only.id));
    assert_eq!(ids.last(), Some(&global_only.id));
    let global_pos = ids.iter().position(|&i| i == global_only.id).unwrap();
    let linked_pos = ids.iter().position(|&i| i == linked_only.id).unwrap();
    assert!(linked_pos < global_pos);
}

#[sqlx::test(migrations = "./migrations")]
async fn paginated_listing_reports_total_across_pages(pool: PgPool) {
    use showroom_core::pagination::{PageQuery, PageSize};

    for i in 0..3 {
        TagRepo::create(&pool, &format!("Tag {i}"), &format!("tag-{i}"))
            .await
            .unwrap();
    }

    let query = PageQuery {
        page: 1,
        page_size: PageSize::Count(2),
        ..PageQuery::default()
    };
    let (rows, total) = TagRepo::list_paginated(&pool, &query).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(total, 3);

    let query = PageQuery {
        page: 2,
        page_size: PageSize::Count(2),
        ..PageQuery::default()
    };
    let (rows, total) = TagRepo::list_paginated(&pool, &query).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(total, 3);
}
