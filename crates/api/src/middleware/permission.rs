//! Role-permission checks for mutating endpoints.

use sqlx::PgPool;

use showroom_core::error::CoreError;
use showroom_core::permissions::grants;
use showroom_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Ensure the authenticated user holds `permission` (or the wildcard).
///
/// Loads the permission strings granted by the user's roles and checks them
/// against the requirement. Call this at the top of every mutating handler.
pub async fn authorize(pool: &PgPool, user: &AuthUser, permission: &str) -> AppResult<()> {
    let granted = if user.role_ids.is_empty() {
        Vec::new()
    } else {
        UserRepo::permissions_for_roles(pool, &user.role_ids).await?
    };

    if grants(&granted, permission) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to perform this action".into(),
        )))
    }
}
