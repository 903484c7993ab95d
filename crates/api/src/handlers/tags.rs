//! Tag handlers.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use showroom_core::pagination::{Page, PageQuery};
use showroom_core::permissions::PERM_TAGS_MANAGE;
use showroom_core::types::DbId;
use showroom_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::permission::authorize;
use crate::response;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, message = "The name field is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "The slug field is required"))]
    pub slug: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTagRequest {
    pub id: DbId,
    #[validate(length(min = 1, message = "The name field is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "The slug field is required"))]
    pub slug: String,
}

/// GET / -- public id/name list of active tags.
pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    let tags = TagRepo::list_id_name(&state.pool).await?;
    Ok(response::ok("Tags retrieved successfully", tags))
}

/// POST / -- paginated listing (auth).
pub async fn paginate(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(query): Json<PageQuery>,
) -> AppResult<Response> {
    let (rows, total) = TagRepo::list_paginated(&state.pool, &query).await?;
    Ok(response::ok(
        "Tags retrieved successfully",
        Page::new(rows, total, &query),
    ))
}

/// POST /create -- create a tag.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateTagRequest>,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_TAGS_MANAGE).await?;
    req.validate()?;

    if TagRepo::slug_in_use(&state.pool, &req.slug, None).await? {
        return Err(AppError::field("slug", "Slug already exists"));
    }

    let tag = TagRepo::create(&state.pool, &req.name, &req.slug).await?;
    Ok(response::created("Tag created successfully", tag))
}

/// PUT / -- update a tag.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<UpdateTagRequest>,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_TAGS_MANAGE).await?;
    req.validate()?;

    if TagRepo::slug_in_use(&state.pool, &req.slug, Some(req.id)).await? {
        return Err(AppError::field("slug", "Slug already exists"));
    }

    let tag = TagRepo::update(&state.pool, req.id, &req.name, &req.slug)
        .await?
        .ok_or_else(|| AppError::not_found("Tag", req.id))?;
    Ok(response::ok("Tag updated successfully", tag))
}

/// DELETE /{id} -- soft-delete a tag.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_TAGS_MANAGE).await?;

    if TagRepo::soft_delete(&state.pool, id).await? {
        Ok(response::message_only("Tag deleted successfully"))
    } else {
        Err(AppError::not_found("Tag", id))
    }
}
