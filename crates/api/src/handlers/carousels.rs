//! Carousel handlers.

use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use axum::Json;

use showroom_core::pagination::{Page, PageQuery};
use showroom_core::permissions::PERM_CAROUSELS_MANAGE;
use showroom_core::types::DbId;
use showroom_db::models::carousel::NewCarousel;
use showroom_db::repositories::CarouselRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::permission::authorize;
use crate::response;
use crate::state::AppState;
use crate::upload::UploadForm;

/// GET /getHomeList -- active carousels for the public home page.
pub async fn get_home_list(State(state): State<AppState>) -> AppResult<Response> {
    let carousels = CarouselRepo::home_list(&state.pool).await?;
    Ok(response::ok("Carousels retrieved successfully", carousels))
}

/// GET /{id} -- single carousel.
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let carousel = CarouselRepo::find_active_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Carousel", id))?;
    Ok(response::ok("Carousel retrieved successfully", carousel))
}

/// POST / -- paginated listing (auth).
pub async fn paginate(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(query): Json<PageQuery>,
) -> AppResult<Response> {
    let (rows, total) = CarouselRepo::list_paginated(&state.pool, &query).await?;
    Ok(response::ok(
        "Carousels retrieved successfully",
        Page::new(rows, total, &query),
    ))
}

/// POST /create -- create a carousel (multipart, single file required).
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_CAROUSELS_MANAGE).await?;

    let form = UploadForm::collect(&mut multipart, &state.config, None).await?;

    let name = form.require_text("name")?.to_string();
    let link = form.text("link").unwrap_or_default().to_string();
    let file = form
        .files
        .first()
        .ok_or_else(|| AppError::field("media", "The media file is required"))?;

    let carousel = CarouselRepo::create(
        &state.pool,
        NewCarousel {
            name,
            link,
            media_url: file.url.clone(),
            media_type: file.media_type.as_str().to_string(),
        },
    )
    .await?;

    Ok(response::created("Carousel created successfully", carousel))
}

/// PUT / -- update a carousel; a new file replaces the stored one.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_CAROUSELS_MANAGE).await?;

    let form = UploadForm::collect(&mut multipart, &state.config, None).await?;

    let id: DbId = form
        .require_text("id")?
        .parse()
        .map_err(|_| AppError::field("id", "The id field must be an integer"))?;
    let name = form.require_text("name")?.to_string();
    let link = form.text("link").unwrap_or_default().to_string();
    let media = form
        .files
        .first()
        .map(|f| (f.url.as_str(), f.media_type.as_str()));

    let carousel = CarouselRepo::update(&state.pool, id, &name, &link, media)
        .await?
        .ok_or_else(|| AppError::not_found("Carousel", id))?;

    Ok(response::ok("Carousel updated successfully", carousel))
}

/// DELETE /{id} -- soft-delete a carousel.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_CAROUSELS_MANAGE).await?;

    if CarouselRepo::soft_delete(&state.pool, id).await? {
        Ok(response::message_only("Carousel deleted successfully"))
    } else {
        Err(AppError::not_found("Carousel", id))
    }
}
