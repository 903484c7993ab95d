//! Repository for the `carousels` table.

use sqlx::PgPool;

use showroom_core::pagination::{resolve_sort_column, PageQuery};
use showroom_core::types::DbId;

use crate::models::carousel::{Carousel, NewCarousel};

/// Column list for `carousels` queries.
const CAROUSEL_COLUMNS: &str = "id, name, link, media_url, media_type, created_at, updated_at";

const CAROUSEL_SORT_COLUMNS: &[(&str, &str)] =
    &[("name", "name"), ("createdAt", "created_at")];

/// Provides CRUD operations for carousels.
pub struct CarouselRepo;

impl CarouselRepo {
    /// Active carousels for the home page, newest first.
    pub async fn home_list(pool: &PgPool) -> Result<Vec<Carousel>, sqlx::Error> {
        let query = format!(
            "SELECT {CAROUSEL_COLUMNS} FROM carousels \
             WHERE deleted_at IS NULL \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Carousel>(&query).fetch_all(pool).await
    }

    /// Find an active carousel by its ID.
    pub async fn find_active_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Carousel>, sqlx::Error> {
        let query = format!(
            "SELECT {CAROUSEL_COLUMNS} FROM carousels WHERE id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Carousel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Paginated listing with substring search over the name.
    pub async fn list_paginated(
        pool: &PgPool,
        query: &PageQuery,
    ) -> Result<(Vec<Carousel>, i64), sqlx::Error> {
        let order =
            resolve_sort_column(query.sort_by.as_deref(), CAROUSEL_SORT_COLUMNS, "created_at");
        let direction = query.sort_order.as_sql();

        let mut filter = String::from("WHERE deleted_at IS NULL");
        if !query.search.is_empty() {
            filter.push_str(" AND name ILIKE $1");
        }

        let mut list_sql = format!(
            "SELECT {CAROUSEL_COLUMNS} FROM carousels {filter} ORDER BY {order} {direction}"
        );
        if let Some((limit, offset)) = query.limit_offset() {
            list_sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
        }
        let count_sql = format!("SELECT COUNT(*) FROM carousels {filter}");

        let (rows, total) = if query.search.is_empty() {
            let rows = sqlx::query_as::<_, Carousel>(&list_sql)
                .fetch_all(pool)
                .await?;
            let total = sqlx::query_scalar::<_, i64>(&count_sql)
                .fetch_one(pool)
                .await?;
            (rows, total)
        } else {
            let pattern = query.search_pattern();
            let rows = sqlx::query_as::<_, Carousel>(&list_sql)
                .bind(&pattern)
                .fetch_all(pool)
                .await?;
            let total = sqlx::query_scalar::<_, i64>(&count_sql)
                .bind(&pattern)
                .fetch_one(pool)
                .await?;
            (rows, total)
        };

        Ok((rows, total))
    }

    /// Insert a carousel.
    pub async fn create(pool: &PgPool, item: NewCarousel) -> Result<Carousel, sqlx::Error> {
        let query = format!(
            "INSERT INTO carousels (name, link, media_url, media_type) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CAROUSEL_COLUMNS}"
        );
        sqlx::query_as::<_, Carousel>(&query)
            .bind(&item.name)
            .bind(&item.link)
            .bind(&item.media_url)
            .bind(&item.media_type)
            .fetch_one(pool)
            .await
    }

    /// Update an active carousel. `media` replaces the stored file reference
    /// when present.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
        link: &str,
        media: Option<(&str, &str)>,
    ) -> Result<Option<Carousel>, sqlx::Error> {
        let query = format!(
            "UPDATE carousels SET \
                 name = $2, \
                 link = $3, \
                 media_url = COALESCE($4, media_url), \
                 media_type = COALESCE($5, media_type), \
                 updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {CAROUSEL_COLUMNS}"
        );
        sqlx::query_as::<_, Carousel>(&query)
            .bind(id)
            .bind(name)
            .bind(link)
            .bind(media.map(|(url, _)| url))
            .bind(media.map(|(_, media_type)| media_type))
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a carousel. Returns `true` if an active row was deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE carousels SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
