//! Repository for the `cars` table and its owned relations: variants, media
//! files, tag links.
//!
//! Creates and updates fan out over several tables and always run inside a
//! single transaction. Updates are replace-style reconciliations planned by
//! `showroom_core::diff`.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{FromRow, PgPool};

use showroom_core::diff::{ChildItem, IdDiff, VariantSyncPlan};
use showroom_core::pagination::{resolve_sort_column, PageQuery};
use showroom_core::slug::deletion_suffix;
use showroom_core::types::DbId;

use crate::models::car::{
    Car, CarDetail, CarEditDetail, CarFields, CarIdName, CarSummary, MediaFile, NewCar,
    NewMediaFile, TagRef, Variant, VariantInput,
};
use crate::models::testimonial::Testimonial;
use crate::repositories::promo_repo::PromoRepo;

/// Column list for `cars` queries.
const CAR_COLUMNS: &str = "id, name, slug, description, page, created_at, updated_at";

/// Column list for `variants`. `price` is NUMERIC and is cast so it decodes
/// as `f64`.
const VARIANT_COLUMNS: &str = "id, car_id, name, price::FLOAT8 AS price";

/// Column list for `media_files`.
const MEDIA_COLUMNS: &str = "id, car_id, url, media_type";

/// Number of cars on the home list.
const HOME_LIST_SIZE: i64 = 5;

const CAR_SORT_COLUMNS: &[(&str, &str)] = &[
    ("name", "name"),
    ("slug", "slug"),
    ("createdAt", "created_at"),
];

/// Flat join row used to group tags per car.
#[derive(Debug, FromRow)]
struct CarTagRow {
    car_id: DbId,
    id: DbId,
    name: String,
    slug: String,
}

/// Provides CRUD operations for cars and their relations.
pub struct CarRepo;

impl CarRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The newest active cars for the home page, as summary rows.
    pub async fn home_list(pool: &PgPool) -> Result<Vec<CarSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {CAR_COLUMNS} FROM cars \
             WHERE deleted_at IS NULL \
             ORDER BY created_at DESC \
             LIMIT {HOME_LIST_SIZE}"
        );
        let cars = sqlx::query_as::<_, Car>(&query).fetch_all(pool).await?;
        Self::summarize(pool, cars).await
    }

    /// All active cars as summary rows, name ascending. Public catalog list.
    pub async fn list_all_summaries(pool: &PgPool) -> Result<Vec<CarSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE deleted_at IS NULL ORDER BY name"
        );
        let cars = sqlx::query_as::<_, Car>(&query).fetch_all(pool).await?;
        Self::summarize(pool, cars).await
    }

    /// Active cars as id/name pairs, name ascending. Selection lists.
    pub async fn list_id_name(pool: &PgPool) -> Result<Vec<CarIdName>, sqlx::Error> {
        sqlx::query_as::<_, CarIdName>(
            "SELECT id, name FROM cars WHERE deleted_at IS NULL ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    /// Whether an active car with this id exists.
    pub async fn exists_active(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM cars WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Whether an active car already uses `slug`, excluding one row if given.
    pub async fn slug_in_use(
        pool: &PgPool,
        slug: &str,
        exclude: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(\
                 SELECT 1 FROM cars \
                 WHERE slug = $1 AND deleted_at IS NULL AND ($2::BIGINT IS NULL OR id <> $2)\
             )",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(pool)
        .await
    }

    /// Slugs of all active cars, for the sitemap.
    pub async fn active_slugs(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT slug FROM cars WHERE deleted_at IS NULL ORDER BY slug",
        )
        .fetch_all(pool)
        .await
    }

    /// Public detail by slug: the car with tags, variants, media files,
    /// testimonials and the merged promo list.
    pub async fn detail_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<CarDetail>, sqlx::Error> {
        let query =
            format!("SELECT {CAR_COLUMNS} FROM cars WHERE slug = $1 AND deleted_at IS NULL");
        let Some(car) = sqlx::query_as::<_, Car>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let ids = [car.id];
        let tags = Self::tags_for(pool, &ids).await?.remove(&car.id).unwrap_or_default();
        let variants = Self::variants_for(pool, &ids)
            .await?
            .remove(&car.id)
            .unwrap_or_default();
        let media_files = Self::media_for(pool, &ids)
            .await?
            .remove(&car.id)
            .unwrap_or_default();
        let testimonials = Self::testimonials_for_car(pool, car.id).await?;
        let promos = PromoRepo::merged_for_car(pool, car.id).await?;

        Ok(Some(CarDetail {
            car,
            tags,
            variants,
            media_files,
            testimonials,
            promos,
        }))
    }

    /// Admin edit payload by id: the car with tag ids, variants and media.
    pub async fn edit_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CarEditDetail>, sqlx::Error> {
        let query =
            format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = $1 AND deleted_at IS NULL");
        let Some(car) = sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let ids = [car.id];
        let tag_ids = sqlx::query_scalar::<_, DbId>(
            "SELECT tag_id FROM car_tags WHERE car_id = $1 ORDER BY tag_id",
        )
        .bind(car.id)
        .fetch_all(pool)
        .await?;
        let variants = Self::variants_for(pool, &ids)
            .await?
            .remove(&car.id)
            .unwrap_or_default();
        let media_files = Self::media_for(pool, &ids)
            .await?
            .remove(&car.id)
            .unwrap_or_default();

        Ok(Some(CarEditDetail {
            car,
            tag_ids,
            variants,
            media_files,
        }))
    }

    /// Paginated summary listing with substring search over name and slug.
    pub async fn list_paginated(
        pool: &PgPool,
        query: &PageQuery,
    ) -> Result<(Vec<CarSummary>, i64), sqlx::Error> {
        let order = resolve_sort_column(query.sort_by.as_deref(), CAR_SORT_COLUMNS, "created_at");
        let direction = query.sort_order.as_sql();

        let mut filter = String::from("WHERE deleted_at IS NULL");
        if !query.search.is_empty() {
            filter.push_str(" AND (name ILIKE $1 OR slug ILIKE $1)");
        }

        let mut list_sql =
            format!("SELECT {CAR_COLUMNS} FROM cars {filter} ORDER BY {order} {direction}");
        if let Some((limit, offset)) = query.limit_offset() {
            list_sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
        }
        let count_sql = format!("SELECT COUNT(*) FROM cars {filter}");

        let (cars, total) = if query.search.is_empty() {
            let rows = sqlx::query_as::<_, Car>(&list_sql).fetch_all(pool).await?;
            let total = sqlx::query_scalar::<_, i64>(&count_sql)
                .fetch_one(pool)
                .await?;
            (rows, total)
        } else {
            let pattern = query.search_pattern();
            let rows = sqlx::query_as::<_, Car>(&list_sql)
                .bind(&pattern)
                .fetch_all(pool)
                .await?;
            let total = sqlx::query_scalar::<_, i64>(&count_sql)
                .bind(&pattern)
                .fetch_one(pool)
                .await?;
            (rows, total)
        };

        let rows = Self::summarize(pool, cars).await?;
        Ok((rows, total))
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Create a car with its tag links, variants and media rows in one
    /// transaction.
    pub async fn create(
        pool: &PgPool,
        car: NewCar,
        tag_ids: &[DbId],
        variants: &[VariantInput],
        media: &[NewMediaFile],
    ) -> Result<Car, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_sql = format!(
            "INSERT INTO cars (name, slug, description, page) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CAR_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Car>(&insert_sql)
            .bind(&car.name)
            .bind(&car.slug)
            .bind(&car.description)
            .bind(&car.page)
            .fetch_one(&mut *tx)
            .await?;

        for &tag_id in tag_ids {
            Self::link_tag(&mut tx, row.id, tag_id).await?;
        }
        for variant in variants {
            Self::insert_variant(&mut tx, row.id, &variant.name, variant.price).await?;
        }
        for file in media {
            Self::insert_media(&mut tx, row.id, file).await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Update an active car and reconcile its relations in one transaction.
    ///
    /// Tags are diff-synced against `tag_ids`. Media rows absent from
    /// `keep_media_ids` are removed and `new_media` is appended. Variants
    /// follow the optional-id contract: no id inserts, an id updates, and
    /// existing variants missing from the list are soft-deleted.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: CarFields,
        tag_ids: &[DbId],
        variants: Vec<VariantInput>,
        keep_media_ids: &[DbId],
        new_media: &[NewMediaFile],
    ) -> Result<Option<Car>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_sql = format!(
            "UPDATE cars SET \
                 name = $2, slug = $3, description = $4, page = $5, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {CAR_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Car>(&update_sql)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.slug)
            .bind(&fields.description)
            .bind(&fields.page)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        // Tag links.
        let existing_tags =
            sqlx::query_scalar::<_, DbId>("SELECT tag_id FROM car_tags WHERE car_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;
        let diff = IdDiff::between(&existing_tags, tag_ids);
        if !diff.to_delete.is_empty() {
            sqlx::query("DELETE FROM car_tags WHERE car_id = $1 AND tag_id = ANY($2)")
                .bind(id)
                .bind(&diff.to_delete)
                .execute(&mut *tx)
                .await?;
        }
        for tag_id in diff.to_create {
            Self::link_tag(&mut tx, id, tag_id).await?;
        }

        // Media: drop everything not in the keep list, then append uploads.
        sqlx::query("DELETE FROM media_files WHERE car_id = $1 AND id <> ALL($2)")
            .bind(id)
            .bind(keep_media_ids)
            .execute(&mut *tx)
            .await?;
        for file in new_media {
            Self::insert_media(&mut tx, id, file).await?;
        }

        // Variants.
        let existing_variants = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM variants WHERE car_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        let incoming = variants
            .into_iter()
            .map(|v| ChildItem {
                id: v.id,
                value: (v.name, v.price),
            })
            .collect();
        let plan = VariantSyncPlan::plan(&existing_variants, incoming);

        if !plan.delete.is_empty() {
            sqlx::query(
                "UPDATE variants SET deleted_at = NOW(), updated_at = NOW() \
                 WHERE car_id = $1 AND id = ANY($2)",
            )
            .bind(id)
            .bind(&plan.delete)
            .execute(&mut *tx)
            .await?;
        }
        for (variant_id, (name, price)) in plan.update {
            sqlx::query(
                "UPDATE variants SET name = $3, price = $4, updated_at = NOW() \
                 WHERE id = $2 AND car_id = $1 AND deleted_at IS NULL",
            )
            .bind(id)
            .bind(variant_id)
            .bind(&name)
            .bind(price)
            .execute(&mut *tx)
            .await?;
        }
        for (name, price) in plan.create {
            Self::insert_variant(&mut tx, id, &name, price).await?;
        }

        tx.commit().await?;
        Ok(Some(row))
    }

    /// Soft-delete a car and rewrite its slug to free the original value.
    ///
    /// Returns `true` if an active car was deleted. A second call for the
    /// same id hits no rows and returns `false`.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let marker = deletion_suffix(Utc::now().timestamp_millis());
        let result = sqlx::query(
            "UPDATE cars SET deleted_at = NOW(), slug = slug || $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(&marker)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn link_tag(tx: &mut sqlx::Transaction<'_, sqlx::Postgres>, car_id: DbId, tag_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO car_tags (car_id, tag_id) VALUES ($1, $2)")
            .bind(car_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn insert_variant(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        car_id: DbId,
        name: &str,
        price: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO variants (car_id, name, price) VALUES ($1, $2, $3)")
            .bind(car_id)
            .bind(name)
            .bind(price)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn insert_media(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        car_id: DbId,
        file: &NewMediaFile,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO media_files (car_id, url, media_type) VALUES ($1, $2, $3)")
            .bind(car_id)
            .bind(&file.url)
            .bind(&file.media_type)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Attach variants, tags, first media URL and price stats to a car page.
    async fn summarize(pool: &PgPool, cars: Vec<Car>) -> Result<Vec<CarSummary>, sqlx::Error> {
        let ids: Vec<DbId> = cars.iter().map(|c| c.id).collect();
        let mut variants = Self::variants_for(pool, &ids).await?;
        let mut tags = Self::tags_for(pool, &ids).await?;
        let mut media = Self::media_for(pool, &ids).await?;

        Ok(cars
            .into_iter()
            .map(|car| {
                let variants = variants.remove(&car.id).unwrap_or_default();
                let tags = tags.remove(&car.id).unwrap_or_default();
                let media_url = media
                    .remove(&car.id)
                    .unwrap_or_default()
                    .into_iter()
                    .next()
                    .map(|m| m.url);
                let min_price = variants
                    .iter()
                    .map(|v| v.price)
                    .fold(None, |acc: Option<f64>, p| {
                        Some(acc.map_or(p, |a| a.min(p)))
                    });
                let max_price = variants
                    .iter()
                    .map(|v| v.price)
                    .fold(None, |acc: Option<f64>, p| {
                        Some(acc.map_or(p, |a| a.max(p)))
                    });

                CarSummary {
                    id: car.id,
                    name: car.name,
                    slug: car.slug,
                    description: car.description,
                    created_at: car.created_at,
                    media_url,
                    min_price,
                    max_price,
                    total_variants: variants.len() as i64,
                    variants,
                    tags,
                }
            })
            .collect())
    }

    /// Active variants for a set of cars, grouped by car id.
    async fn variants_for(
        pool: &PgPool,
        car_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Variant>>, sqlx::Error> {
        let query = format!(
            "SELECT {VARIANT_COLUMNS} FROM variants \
             WHERE car_id = ANY($1) AND deleted_at IS NULL \
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, Variant>(&query)
            .bind(car_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<Variant>> = HashMap::new();
        for row in rows {
            grouped.entry(row.car_id).or_default().push(row);
        }
        Ok(grouped)
    }

    /// Active tags for a set of cars, grouped by car id.
    async fn tags_for(
        pool: &PgPool,
        car_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<TagRef>>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CarTagRow>(
            "SELECT ct.car_id, t.id, t.name, t.slug FROM tags t \
             JOIN car_tags ct ON ct.tag_id = t.id \
             WHERE ct.car_id = ANY($1) AND t.deleted_at IS NULL \
             ORDER BY t.name",
        )
        .bind(car_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<TagRef>> = HashMap::new();
        for row in rows {
            grouped.entry(row.car_id).or_default().push(TagRef {
                id: row.id,
                name: row.name,
                slug: row.slug,
            });
        }
        Ok(grouped)
    }

    /// Media files for a set of cars, grouped by car id, insertion order.
    async fn media_for(
        pool: &PgPool,
        car_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<MediaFile>>, sqlx::Error> {
        let query = format!(
            "SELECT {MEDIA_COLUMNS} FROM media_files WHERE car_id = ANY($1) ORDER BY id"
        );
        let rows = sqlx::query_as::<_, MediaFile>(&query)
            .bind(car_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<MediaFile>> = HashMap::new();
        for row in rows {
            grouped.entry(row.car_id).or_default().push(row);
        }
        Ok(grouped)
    }

    /// Active testimonials for one car, newest first.
    async fn testimonials_for_car(
        pool: &PgPool,
        car_id: DbId,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            "SELECT id, car_id, name, message, image_url, created_at, updated_at \
             FROM testimonials \
             WHERE car_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC",
        )
        .bind(car_id)
        .fetch_all(pool)
        .await
    }
}
