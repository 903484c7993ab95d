//! Car handlers.
//!
//! Create and update take `multipart/form-data`: scalar fields as text parts,
//! `tags` / `variants` / `mediaFiles` as JSON-encoded arrays, uploads under
//! `media`. Car creation is the one place where uploads are checked against
//! the MIME allow-list in addition to the global size cap.

use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use axum::Json;

use showroom_core::media::CAR_CREATE_ALLOWED_MIME_TYPES;
use showroom_core::pagination::{Page, PageQuery};
use showroom_core::permissions::PERM_CARS_MANAGE;
use showroom_core::richtext::has_visible_text;
use showroom_core::types::DbId;
use showroom_db::models::car::{CarFields, NewCar, NewMediaFile, VariantInput};
use showroom_db::repositories::CarRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::permission::authorize;
use crate::response;
use crate::state::AppState;
use crate::upload::{StoredFile, UploadForm};

/// GET /getHomeList -- newest cars for the public home page.
pub async fn get_home_list(State(state): State<AppState>) -> AppResult<Response> {
    let cars = CarRepo::home_list(&state.pool).await?;
    Ok(response::ok("Cars retrieved successfully", cars))
}

/// GET /list -- all active cars for the public catalog, name ascending.
pub async fn get_list(State(state): State<AppState>) -> AppResult<Response> {
    let cars = CarRepo::list_all_summaries(&state.pool).await?;
    Ok(response::ok("Cars retrieved successfully", cars))
}

/// GET /detail/{slug} -- public detail page payload.
pub async fn get_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let detail = CarRepo::detail_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::not_found("Car", 0))?;
    Ok(response::ok("Car retrieved successfully", detail))
}

/// GET / -- id/name list of active cars (admin selection lists).
pub async fn get_all(State(state): State<AppState>, _user: AuthUser) -> AppResult<Response> {
    let cars = CarRepo::list_id_name(&state.pool).await?;
    Ok(response::ok("Cars retrieved successfully", cars))
}

/// GET /{id} -- admin edit payload.
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let detail = CarRepo::edit_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Car", id))?;
    Ok(response::ok("Car retrieved successfully", detail))
}

/// POST / -- paginated summary listing (auth).
pub async fn paginate(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(query): Json<PageQuery>,
) -> AppResult<Response> {
    let (rows, total) = CarRepo::list_paginated(&state.pool, &query).await?;
    Ok(response::ok(
        "Cars retrieved successfully",
        Page::new(rows, total, &query),
    ))
}

/// POST /create -- create a car with tags, variants and media (multipart).
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_CARS_MANAGE).await?;

    let form = UploadForm::collect(
        &mut multipart,
        &state.config,
        Some(CAR_CREATE_ALLOWED_MIME_TYPES),
    )
    .await?;

    let fields = scalar_fields(&form)?;
    let tag_ids: Vec<DbId> = form.json_array("tags")?;
    let variants: Vec<VariantInput> = form.json_array("variants")?;

    if form.files.is_empty() {
        return Err(AppError::field("media", "At least one media file is required"));
    }
    if CarRepo::slug_in_use(&state.pool, &fields.slug, None).await? {
        return Err(AppError::field("slug", "Slug already exists"));
    }

    let media = stored_media(&form.files);
    let car = CarRepo::create(
        &state.pool,
        NewCar {
            name: fields.name,
            slug: fields.slug,
            description: fields.description,
            page: fields.page,
        },
        &tag_ids,
        &variants,
        &media,
    )
    .await?;

    Ok(response::created("Car created successfully", car))
}

/// PUT / -- update a car and reconcile its relations (multipart).
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_CARS_MANAGE).await?;

    let form = UploadForm::collect(&mut multipart, &state.config, None).await?;

    let id = parse_id(&form)?;
    let fields = scalar_fields(&form)?;
    let tag_ids: Vec<DbId> = form.json_array("tags")?;
    let variants: Vec<VariantInput> = form.json_array("variants")?;
    let keep_media_ids: Vec<DbId> = form.json_array("mediaFiles")?;

    if form.files.is_empty() && keep_media_ids.is_empty() {
        return Err(AppError::field("media", "At least one media file is required"));
    }
    if CarRepo::slug_in_use(&state.pool, &fields.slug, Some(id)).await? {
        return Err(AppError::field("slug", "Slug already exists"));
    }

    let new_media = stored_media(&form.files);
    let car = CarRepo::update(
        &state.pool,
        id,
        fields,
        &tag_ids,
        variants,
        &keep_media_ids,
        &new_media,
    )
    .await?
    .ok_or_else(|| AppError::not_found("Car", id))?;

    Ok(response::ok("Car updated successfully", car))
}

/// DELETE /{id} -- soft-delete a car, freeing its slug.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_CARS_MANAGE).await?;

    if CarRepo::soft_delete(&state.pool, id).await? {
        Ok(response::message_only("Car deleted successfully"))
    } else {
        Err(AppError::not_found("Car", id))
    }
}

/// Pull and validate the scalar car fields from a multipart form.
fn scalar_fields(form: &UploadForm) -> AppResult<CarFields> {
    let name = form.require_text("name")?.to_string();
    let slug = form.require_text("slug")?.to_string();
    let description = form.text("description").unwrap_or_default().to_string();
    let page = form.text("page").unwrap_or_default().to_string();

    if !page.is_empty() && !has_visible_text(&page) {
        return Err(AppError::field("page", "The page field must contain content"));
    }

    Ok(CarFields {
        name,
        slug,
        description,
        page,
    })
}

fn parse_id(form: &UploadForm) -> AppResult<DbId> {
    form.require_text("id")?
        .parse()
        .map_err(|_| AppError::field("id", "The id field must be an integer"))
}

fn stored_media(files: &[StoredFile]) -> Vec<NewMediaFile> {
    files
        .iter()
        .map(|f| NewMediaFile {
            url: f.url.clone(),
            media_type: f.media_type.as_str().to_string(),
        })
        .collect()
}
