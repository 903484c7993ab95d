//! Repository for users, roles and permissions.

use sqlx::PgPool;

use showroom_core::types::DbId;

use crate::models::user::User;

/// Column list for `users` queries.
const USER_COLUMNS: &str =
    "id, username, email, password_hash, is_active, created_at, updated_at";

/// Provides lookups for authentication and authorization.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Role ids assigned to a user.
    pub async fn role_ids(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT role_id FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Distinct permission strings granted by a set of roles.
    pub async fn permissions_for_roles(
        pool: &PgPool,
        role_ids: &[DbId],
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT permission FROM role_permissions WHERE role_id = ANY($1)",
        )
        .bind(role_ids)
        .fetch_all(pool)
        .await
    }

    /// Insert a user. Used by seeds and tests.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    /// Assign a role to a user. Idempotent.
    pub async fn assign_role(
        pool: &PgPool,
        user_id: DbId,
        role_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, role_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Look up a role id by name.
    pub async fn role_id_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
