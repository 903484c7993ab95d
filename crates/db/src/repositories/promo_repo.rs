//! Repository for the `promos` table and `car_promos` links.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{FromRow, PgPool};

use showroom_core::diff::IdDiff;
use showroom_core::pagination::{resolve_sort_column, PageQuery};
use showroom_core::slug::deletion_suffix;
use showroom_core::types::DbId;

use crate::models::car::CarIdName;
use crate::models::promo::{
    NewPromo, Promo, PromoFields, PromoHomeItem, PromoIdName, PromoWithCars,
};

/// Column list for `promos` queries.
const PROMO_COLUMNS: &str = "\
    id, name, slug, start_date, end_date, page, media_url, media_type, \
    is_global, created_at, updated_at";

/// Same list qualified for joins.
const PROMO_COLUMNS_QUALIFIED: &str = "\
    p.id, p.name, p.slug, p.start_date, p.end_date, p.page, p.media_url, \
    p.media_type, p.is_global, p.created_at, p.updated_at";

const PROMO_SORT_COLUMNS: &[(&str, &str)] = &[
    ("name", "name"),
    ("startDate", "start_date"),
    ("endDate", "end_date"),
    ("createdAt", "created_at"),
];

/// Flat join row used to group linked cars per promo.
#[derive(Debug, FromRow)]
struct PromoCarRow {
    promo_id: DbId,
    id: DbId,
    name: String,
}

/// Provides CRUD operations for promos and their car links.
pub struct PromoRepo;

impl PromoRepo {
    /// Active promos for the home page, earliest start date first.
    pub async fn home_list(pool: &PgPool) -> Result<Vec<PromoHomeItem>, sqlx::Error> {
        sqlx::query_as::<_, PromoHomeItem>(
            "SELECT id, name, slug, start_date, end_date, media_url \
             FROM promos \
             WHERE deleted_at IS NULL \
             ORDER BY start_date",
        )
        .fetch_all(pool)
        .await
    }

    /// Active promos as id/name pairs, name ascending.
    pub async fn list_id_name(pool: &PgPool) -> Result<Vec<PromoIdName>, sqlx::Error> {
        sqlx::query_as::<_, PromoIdName>(
            "SELECT id, name FROM promos WHERE deleted_at IS NULL ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    /// Find an active promo by its ID, with its linked cars.
    pub async fn find_active_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PromoWithCars>, sqlx::Error> {
        let query =
            format!("SELECT {PROMO_COLUMNS} FROM promos WHERE id = $1 AND deleted_at IS NULL");
        let promo = sqlx::query_as::<_, Promo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match promo {
            Some(promo) => {
                let cars = Self::linked_cars(pool, promo.id).await?;
                Ok(Some(PromoWithCars { promo, cars }))
            }
            None => Ok(None),
        }
    }

    /// Find an active promo by its slug, with its linked cars.
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<PromoWithCars>, sqlx::Error> {
        let query =
            format!("SELECT {PROMO_COLUMNS} FROM promos WHERE slug = $1 AND deleted_at IS NULL");
        let promo = sqlx::query_as::<_, Promo>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        match promo {
            Some(promo) => {
                let cars = Self::linked_cars(pool, promo.id).await?;
                Ok(Some(PromoWithCars { promo, cars }))
            }
            None => Ok(None),
        }
    }

    /// Whether an active promo already uses `slug`, excluding one row if given.
    pub async fn slug_in_use(
        pool: &PgPool,
        slug: &str,
        exclude: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(\
                 SELECT 1 FROM promos \
                 WHERE slug = $1 AND deleted_at IS NULL AND ($2::BIGINT IS NULL OR id <> $2)\
             )",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(pool)
        .await
    }

    /// Slugs of all active promos, for the sitemap.
    pub async fn active_slugs(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT slug FROM promos WHERE deleted_at IS NULL ORDER BY slug",
        )
        .fetch_all(pool)
        .await
    }

    /// Paginated listing with substring search over the name; each row carries
    /// its linked cars.
    pub async fn list_paginated(
        pool: &PgPool,
        query: &PageQuery,
    ) -> Result<(Vec<PromoWithCars>, i64), sqlx::Error> {
        let order =
            resolve_sort_column(query.sort_by.as_deref(), PROMO_SORT_COLUMNS, "created_at");
        let direction = query.sort_order.as_sql();

        let mut filter = String::from("WHERE deleted_at IS NULL");
        if !query.search.is_empty() {
            filter.push_str(" AND name ILIKE $1");
        }

        let mut list_sql =
            format!("SELECT {PROMO_COLUMNS} FROM promos {filter} ORDER BY {order} {direction}");
        if let Some((limit, offset)) = query.limit_offset() {
            list_sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
        }
        let count_sql = format!("SELECT COUNT(*) FROM promos {filter}");

        let (promos, total) = if query.search.is_empty() {
            let rows = sqlx::query_as::<_, Promo>(&list_sql).fetch_all(pool).await?;
            let total = sqlx::query_scalar::<_, i64>(&count_sql)
                .fetch_one(pool)
                .await?;
            (rows, total)
        } else {
            let pattern = query.search_pattern();
            let rows = sqlx::query_as::<_, Promo>(&list_sql)
                .bind(&pattern)
                .fetch_all(pool)
                .await?;
            let total = sqlx::query_scalar::<_, i64>(&count_sql)
                .bind(&pattern)
                .fetch_one(pool)
                .await?;
            (rows, total)
        };

        let promo_ids: Vec<DbId> = promos.iter().map(|p| p.id).collect();
        let mut cars_by_promo = Self::linked_cars_for(pool, &promo_ids).await?;

        let rows = promos
            .into_iter()
            .map(|promo| {
                let cars = cars_by_promo.remove(&promo.id).unwrap_or_default();
                PromoWithCars { promo, cars }
            })
            .collect();

        Ok((rows, total))
    }

    /// Insert a promo and its car links in one transaction.
    pub async fn create(
        pool: &PgPool,
        promo: NewPromo,
        car_ids: &[DbId],
    ) -> Result<Promo, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_sql = format!(
            "INSERT INTO promos \
                 (name, slug, start_date, end_date, page, media_url, media_type, is_global) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {PROMO_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Promo>(&insert_sql)
            .bind(&promo.name)
            .bind(&promo.slug)
            .bind(promo.start_date)
            .bind(promo.end_date)
            .bind(&promo.page)
            .bind(&promo.media_url)
            .bind(&promo.media_type)
            .bind(promo.is_global)
            .fetch_one(&mut *tx)
            .await?;

        for &car_id in car_ids {
            sqlx::query("INSERT INTO car_promos (car_id, promo_id) VALUES ($1, $2)")
                .bind(car_id)
                .bind(row.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Update an active promo in one transaction.
    ///
    /// `media` replaces the stored file reference when present. `car_links`
    /// semantics follow the request shape: `Some` diff-syncs the link set,
    /// `None` removes every link.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: PromoFields,
        media: Option<(&str, &str)>,
        car_links: Option<&[DbId]>,
    ) -> Result<Option<Promo>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_sql = format!(
            "UPDATE promos SET \
                 name = $2, \
                 slug = $3, \
                 start_date = $4, \
                 end_date = $5, \
                 page = $6, \
                 is_global = $7, \
                 media_url = COALESCE($8, media_url), \
                 media_type = COALESCE($9, media_type), \
                 updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {PROMO_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Promo>(&update_sql)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.slug)
            .bind(fields.start_date)
            .bind(fields.end_date)
            .bind(&fields.page)
            .bind(fields.is_global)
            .bind(media.map(|(url, _)| url))
            .bind(media.map(|(_, media_type)| media_type))
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        match car_links {
            Some(target) => {
                let existing = sqlx::query_scalar::<_, DbId>(
                    "SELECT car_id FROM car_promos WHERE promo_id = $1",
                )
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

                let diff = IdDiff::between(&existing, target);
                if !diff.to_delete.is_empty() {
                    sqlx::query(
                        "DELETE FROM car_promos WHERE promo_id = $1 AND car_id = ANY($2)",
                    )
                    .bind(id)
                    .bind(&diff.to_delete)
                    .execute(&mut *tx)
                    .await?;
                }
                for car_id in diff.to_create {
                    sqlx::query("INSERT INTO car_promos (car_id, promo_id) VALUES ($1, $2)")
                        .bind(car_id)
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;
                }
            }
            None => {
                sqlx::query("DELETE FROM car_promos WHERE promo_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(row))
    }

    /// Soft-delete a promo and rewrite its slug to free the original value.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let marker = deletion_suffix(Utc::now().timestamp_millis());
        let result = sqlx::query(
            "UPDATE promos SET deleted_at = NOW(), slug = slug || $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(&marker)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Active cars linked to one promo, name ascending.
    async fn linked_cars(pool: &PgPool, promo_id: DbId) -> Result<Vec<CarIdName>, sqlx::Error> {
        sqlx::query_as::<_, CarIdName>(
            "SELECT c.id, c.name FROM cars c \
             JOIN car_promos cp ON cp.car_id = c.id \
             WHERE cp.promo_id = $1 AND c.deleted_at IS NULL \
             ORDER BY c.name",
        )
        .bind(promo_id)
        .fetch_all(pool)
        .await
    }

    /// Batch variant of [`Self::linked_cars`] for a page of promos.
    async fn linked_cars_for(
        pool: &PgPool,
        promo_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<CarIdName>>, sqlx::Error> {
        let rows = sqlx::query_as::<_, PromoCarRow>(
            "SELECT cp.promo_id, c.id, c.name FROM cars c \
             JOIN car_promos cp ON cp.car_id = c.id \
             WHERE cp.promo_id = ANY($1) AND c.deleted_at IS NULL \
             ORDER BY c.name",
        )
        .bind(promo_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<CarIdName>> = HashMap::new();
        for row in rows {
            grouped.entry(row.promo_id).or_default().push(CarIdName {
                id: row.id,
                name: row.name,
            });
        }
        Ok(grouped)
    }

    /// Promos visible on a car's public detail page: car-linked promos first,
    /// then currently-global promos not already in the list. Car-linked rows
    /// win on id collisions.
    pub async fn merged_for_car(pool: &PgPool, car_id: DbId) -> Result<Vec<Promo>, sqlx::Error> {
        let linked_sql = format!(
            "SELECT {PROMO_COLUMNS_QUALIFIED} FROM promos p \
             JOIN car_promos cp ON cp.promo_id = p.id \
             WHERE cp.car_id = $1 AND p.deleted_at IS NULL \
             ORDER BY p.start_date"
        );
        let mut promos = sqlx::query_as::<_, Promo>(&linked_sql)
            .bind(car_id)
            .fetch_all(pool)
            .await?;

        let linked_ids: Vec<DbId> = promos.iter().map(|p| p.id).collect();
        let global_sql = format!(
            "SELECT {PROMO_COLUMNS} FROM promos \
             WHERE is_global AND deleted_at IS NULL AND id <> ALL($1) \
             ORDER BY start_date"
        );
        let globals = sqlx::query_as::<_, Promo>(&global_sql)
            .bind(&linked_ids)
            .fetch_all(pool)
            .await?;

        promos.extend(globals);
        Ok(promos)
    }
}
