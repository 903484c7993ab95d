//! Login endpoint.

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use showroom_core::error::CoreError;
use showroom_core::types::DbId;
use showroom_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::response;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "The username field is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "The password field is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    user: UserInfo,
    role_ids: Vec<DbId>,
}

#[derive(Debug, Serialize)]
struct UserInfo {
    id: DbId,
    username: String,
    email: String,
}

/// POST /auth/login -- verify credentials and mint an access token.
///
/// The same 401 is returned for unknown usernames and wrong passwords so the
/// endpoint does not leak which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Response> {
    req.validate()?;

    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = UserRepo::find_by_username(&state.pool, &req.username)
        .await?
        .ok_or_else(invalid)?;

    let password_ok = verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !password_ok {
        return Err(invalid());
    }
    if !user.is_active {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Account is inactive".into(),
        )));
    }

    let role_ids = UserRepo::role_ids(&state.pool, user.id).await?;
    let token = generate_access_token(user.id, &role_ids, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(response::ok(
        "Login successful",
        LoginResponse {
            token,
            user: UserInfo {
                id: user.id,
                username: user.username,
                email: user.email,
            },
            role_ids,
        },
    ))
}
