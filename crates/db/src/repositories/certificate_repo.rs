//! Repository for the `certificates` table.
//!
//! Certificates are managed as a single replace-style set: the admin sends the
//! ids to keep plus any new uploads, and everything else is soft-deleted.

use sqlx::PgPool;

use showroom_core::types::DbId;

use crate::models::certificate::{Certificate, NewCertificate};

/// Column list for `certificates` queries.
const CERTIFICATE_COLUMNS: &str = "id, certificate_type, url, created_at, updated_at";

/// Provides operations for the certificate set.
pub struct CertificateRepo;

impl CertificateRepo {
    /// Active certificates, oldest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Certificate>, sqlx::Error> {
        let query = format!(
            "SELECT {CERTIFICATE_COLUMNS} FROM certificates \
             WHERE deleted_at IS NULL \
             ORDER BY created_at"
        );
        sqlx::query_as::<_, Certificate>(&query)
            .fetch_all(pool)
            .await
    }

    /// Replace-style sync: keep the rows in `keep_ids`, soft-delete the rest,
    /// and insert one row per new upload. Runs in a single transaction.
    pub async fn sync(
        pool: &PgPool,
        keep_ids: &[DbId],
        new_items: &[NewCertificate],
    ) -> Result<Vec<Certificate>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE certificates SET deleted_at = NOW(), updated_at = NOW() \
             WHERE deleted_at IS NULL AND id <> ALL($1)",
        )
        .bind(keep_ids)
        .execute(&mut *tx)
        .await?;

        let insert_sql = format!(
            "INSERT INTO certificates (certificate_type, url) \
             VALUES ($1, $2) \
             RETURNING {CERTIFICATE_COLUMNS}"
        );
        for item in new_items {
            sqlx::query_as::<_, Certificate>(&insert_sql)
                .bind(&item.certificate_type)
                .bind(&item.url)
                .fetch_one(&mut *tx)
                .await?;
        }

        let list_sql = format!(
            "SELECT {CERTIFICATE_COLUMNS} FROM certificates \
             WHERE deleted_at IS NULL \
             ORDER BY created_at"
        );
        let rows = sqlx::query_as::<_, Certificate>(&list_sql)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(rows)
    }
}
