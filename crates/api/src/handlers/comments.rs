//! Testimonial (site comment) handlers, mounted at `/comments`.

use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use axum::Json;

use showroom_core::pagination::{Page, PageQuery};
use showroom_core::permissions::PERM_COMMENTS_MANAGE;
use showroom_core::types::DbId;
use showroom_db::models::testimonial::NewTestimonial;
use showroom_db::repositories::{CarRepo, TestimonialRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::permission::authorize;
use crate::response;
use crate::state::AppState;
use crate::upload::UploadForm;

/// GET /getHomeList -- recent testimonials with their car, for the home page.
pub async fn get_home_list(State(state): State<AppState>) -> AppResult<Response> {
    let comments = TestimonialRepo::home_list(&state.pool).await?;
    Ok(response::ok("Comments retrieved successfully", comments))
}

/// GET / -- id/name list of active cars, for the admin comment form.
pub async fn get_car_options(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Response> {
    let cars = CarRepo::list_id_name(&state.pool).await?;
    Ok(response::ok("Cars retrieved successfully", cars))
}

/// GET /{id} -- single testimonial with its car.
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let comment = TestimonialRepo::find_active_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment", id))?;
    Ok(response::ok("Comment retrieved successfully", comment))
}

/// POST / -- paginated listing (auth); `sortBy: "car"` sorts by car name.
pub async fn paginate(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(query): Json<PageQuery>,
) -> AppResult<Response> {
    let (rows, total) = TestimonialRepo::list_paginated(&state.pool, &query).await?;
    Ok(response::ok(
        "Comments retrieved successfully",
        Page::new(rows, total, &query),
    ))
}

/// POST /create -- create a testimonial (multipart, single image required).
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_COMMENTS_MANAGE).await?;

    let form = UploadForm::collect(&mut multipart, &state.config, None).await?;

    let name = form.require_text("name")?.to_string();
    let message = form.require_text("message")?.to_string();
    let car_id = parse_car_id(&form)?;
    ensure_car_exists(&state, car_id).await?;

    let file = form
        .files
        .first()
        .ok_or_else(|| AppError::field("media", "The media file is required"))?;

    let comment = TestimonialRepo::create(
        &state.pool,
        NewTestimonial {
            car_id,
            name,
            message,
            image_url: file.url.clone(),
        },
    )
    .await?;

    Ok(response::created("Comment created successfully", comment))
}

/// PUT / -- update a testimonial; a new image replaces the stored one.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_COMMENTS_MANAGE).await?;

    let form = UploadForm::collect(&mut multipart, &state.config, None).await?;

    let id: DbId = form
        .require_text("id")?
        .parse()
        .map_err(|_| AppError::field("id", "The id field must be an integer"))?;
    let name = form.require_text("name")?.to_string();
    let message = form.require_text("message")?.to_string();
    let car_id = parse_car_id(&form)?;
    ensure_car_exists(&state, car_id).await?;

    let image_url = form.files.first().map(|f| f.url.as_str());
    let comment = TestimonialRepo::update(&state.pool, id, car_id, &name, &message, image_url)
        .await?
        .ok_or_else(|| AppError::not_found("Comment", id))?;

    Ok(response::ok("Comment updated successfully", comment))
}

/// DELETE /{id} -- soft-delete a testimonial.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_COMMENTS_MANAGE).await?;

    if TestimonialRepo::soft_delete(&state.pool, id).await? {
        Ok(response::message_only("Comment deleted successfully"))
    } else {
        Err(AppError::not_found("Comment", id))
    }
}

fn parse_car_id(form: &UploadForm) -> AppResult<DbId> {
    form.require_text("carId")?
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid car ID".into()))
}

async fn ensure_car_exists(state: &AppState, car_id: DbId) -> AppResult<()> {
    if CarRepo::exists_active(&state.pool, car_id).await? {
        Ok(())
    } else {
        Err(AppError::BadRequest("Invalid car ID".into()))
    }
}
