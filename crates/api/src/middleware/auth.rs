//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use showroom_core::error::CoreError;
use showroom_core::types::DbId;

use crate::auth::jwt::{token_error_message, validate_token};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization`
/// header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication; permission checks go through
/// [`crate::middleware::permission::authorize`] afterwards.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// Role ids the token was minted with.
    pub role_ids: Vec<DbId>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unauthorized".into())))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unauthorized".into())))?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            AppError::Core(CoreError::Unauthorized(token_error_message(&e).into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role_ids: claims.roles,
        })
    }
}
