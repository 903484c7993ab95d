//! Repository for the `testimonials` table.

use sqlx::PgPool;

use showroom_core::pagination::{resolve_sort_column, PageQuery};
use showroom_core::types::DbId;

use crate::models::testimonial::{
    NewTestimonial, Testimonial, TestimonialCarRow, TestimonialWithCar,
};

/// Column list for `testimonials` queries.
const TESTIMONIAL_COLUMNS: &str =
    "id, car_id, name, message, image_url, created_at, updated_at";

/// Column list for queries joined with `cars`.
const JOINED_COLUMNS: &str = "\
    t.id, t.car_id, t.name, t.message, t.image_url, t.created_at, t.updated_at, \
    c.name AS car_name";

/// Sort fields. `car` sorts by the joined car's name.
const TESTIMONIAL_SORT_COLUMNS: &[(&str, &str)] = &[
    ("name", "t.name"),
    ("createdAt", "t.created_at"),
    ("car", "c.name"),
];

/// Provides CRUD operations for testimonials.
pub struct TestimonialRepo;

impl TestimonialRepo {
    /// Active testimonials for the home page, newest first, with their car.
    pub async fn home_list(pool: &PgPool) -> Result<Vec<TestimonialWithCar>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM testimonials t \
             JOIN cars c ON c.id = t.car_id \
             WHERE t.deleted_at IS NULL \
             ORDER BY t.created_at DESC"
        );
        let rows = sqlx::query_as::<_, TestimonialCarRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Find an active testimonial by its ID, with its car.
    pub async fn find_active_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TestimonialWithCar>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM testimonials t \
             JOIN cars c ON c.id = t.car_id \
             WHERE t.id = $1 AND t.deleted_at IS NULL"
        );
        let row = sqlx::query_as::<_, TestimonialCarRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Paginated listing with substring search over the author name.
    pub async fn list_paginated(
        pool: &PgPool,
        query: &PageQuery,
    ) -> Result<(Vec<TestimonialWithCar>, i64), sqlx::Error> {
        let order = resolve_sort_column(
            query.sort_by.as_deref(),
            TESTIMONIAL_SORT_COLUMNS,
            "t.created_at",
        );
        let direction = query.sort_order.as_sql();

        let mut filter = String::from("WHERE t.deleted_at IS NULL");
        if !query.search.is_empty() {
            filter.push_str(" AND t.name ILIKE $1");
        }

        let mut list_sql = format!(
            "SELECT {JOINED_COLUMNS} FROM testimonials t \
             JOIN cars c ON c.id = t.car_id \
             {filter} ORDER BY {order} {direction}"
        );
        if let Some((limit, offset)) = query.limit_offset() {
            list_sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
        }
        let count_sql = format!(
            "SELECT COUNT(*) FROM testimonials t \
             JOIN cars c ON c.id = t.car_id \
             {filter}"
        );

        let (rows, total) = if query.search.is_empty() {
            let rows = sqlx::query_as::<_, TestimonialCarRow>(&list_sql)
                .fetch_all(pool)
                .await?;
            let total = sqlx::query_scalar::<_, i64>(&count_sql)
                .fetch_one(pool)
                .await?;
            (rows, total)
        } else {
            let pattern = query.search_pattern();
            let rows = sqlx::query_as::<_, TestimonialCarRow>(&list_sql)
                .bind(&pattern)
                .fetch_all(pool)
                .await?;
            let total = sqlx::query_scalar::<_, i64>(&count_sql)
                .bind(&pattern)
                .fetch_one(pool)
                .await?;
            (rows, total)
        };

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    /// Insert a testimonial.
    pub async fn create(
        pool: &PgPool,
        item: NewTestimonial,
    ) -> Result<Testimonial, sqlx::Error> {
        let query = format!(
            "INSERT INTO testimonials (car_id, name, message, image_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {TESTIMONIAL_COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(item.car_id)
            .bind(&item.name)
            .bind(&item.message)
            .bind(&item.image_url)
            .fetch_one(pool)
            .await
    }

    /// Update an active testimonial. `image_url` replaces the stored image
    /// when present.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        car_id: DbId,
        name: &str,
        message: &str,
        image_url: Option<&str>,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!(
            "UPDATE testimonials SET \
                 car_id = $2, \
                 name = $3, \
                 message = $4, \
                 image_url = COALESCE($5, image_url), \
                 updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {TESTIMONIAL_COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(car_id)
            .bind(name)
            .bind(message)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a testimonial. Returns `true` if an active row was deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE testimonials SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
