//! Repository for the `tags` table.

use chrono::Utc;
use sqlx::PgPool;

use showroom_core::pagination::{resolve_sort_column, PageQuery};
use showroom_core::slug::deletion_suffix;
use showroom_core::types::DbId;

use crate::models::tag::{Tag, TagIdName};

/// Column list for `tags` queries.
const TAG_COLUMNS: &str = "id, name, slug, created_at, updated_at";

/// Client-facing sort fields mapped to columns.
const TAG_SORT_COLUMNS: &[(&str, &str)] = &[
    ("name", "name"),
    ("slug", "slug"),
    ("createdAt", "created_at"),
];

/// Provides CRUD operations for tags.
pub struct TagRepo;

impl TagRepo {
    /// Active tags as id/name pairs, name ascending. Public list endpoint.
    pub async fn list_id_name(pool: &PgPool) -> Result<Vec<TagIdName>, sqlx::Error> {
        sqlx::query_as::<_, TagIdName>(
            "SELECT id, name FROM tags WHERE deleted_at IS NULL ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    /// Find an active tag by its ID.
    pub async fn find_active_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query =
            format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether an active tag already uses `slug`, excluding one row if given.
    pub async fn slug_in_use(
        pool: &PgPool,
        slug: &str,
        exclude: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(\
                 SELECT 1 FROM tags \
                 WHERE slug = $1 AND deleted_at IS NULL AND ($2::BIGINT IS NULL OR id <> $2)\
             )",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(pool)
        .await
    }

    /// Paginated listing with substring search over name and slug.
    pub async fn list_paginated(
        pool: &PgPool,
        query: &PageQuery,
    ) -> Result<(Vec<Tag>, i64), sqlx::Error> {
        let order = resolve_sort_column(query.sort_by.as_deref(), TAG_SORT_COLUMNS, "created_at");
        let direction = query.sort_order.as_sql();

        let mut filter = String::from("WHERE deleted_at IS NULL");
        if !query.search.is_empty() {
            filter.push_str(" AND (name ILIKE $1 OR slug ILIKE $1)");
        }

        let mut list_sql =
            format!("SELECT {TAG_COLUMNS} FROM tags {filter} ORDER BY {order} {direction}");
        if let Some((limit, offset)) = query.limit_offset() {
            list_sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
        }
        let count_sql = format!("SELECT COUNT(*) FROM tags {filter}");

        let (rows, total) = if query.search.is_empty() {
            let rows = sqlx::query_as::<_, Tag>(&list_sql).fetch_all(pool).await?;
            let total = sqlx::query_scalar::<_, i64>(&count_sql)
                .fetch_one(pool)
                .await?;
            (rows, total)
        } else {
            let pattern = query.search_pattern();
            let rows = sqlx::query_as::<_, Tag>(&list_sql)
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

    /// Insert a tag.
    pub async fn create(pool: &PgPool, name: &str, slug: &str) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name, slug) VALUES ($1, $2) RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .bind(slug)
            .fetch_one(pool)
            .await
    }

    /// Update an active tag's name and slug.
    ///
    /// Returns `None` when the tag is missing or soft-deleted.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
        slug: &str,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET name = $2, slug = $3, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(name)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a tag and rewrite its slug to free the original value.
    ///
    /// Returns `true` if an active tag was deleted. A second call for the same
    /// id hits no rows and returns `false`.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let marker = deletion_suffix(Utc::now().timestamp_millis());
        let result = sqlx::query(
            "UPDATE tags SET deleted_at = NOW(), slug = slug || $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(&marker)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
