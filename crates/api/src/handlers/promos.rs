//! Promo handlers.

use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use axum::Json;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use showroom_core::pagination::{Page, PageQuery};
use showroom_core::permissions::PERM_PROMOS_MANAGE;
use showroom_core::types::{DbId, Timestamp};
use showroom_db::models::promo::{NewPromo, PromoFields};
use showroom_db::repositories::PromoRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::permission::authorize;
use crate::response;
use crate::state::AppState;
use crate::upload::UploadForm;

/// GET /getHomeList -- active promos for the public home page.
pub async fn get_home_list(State(state): State<AppState>) -> AppResult<Response> {
    let promos = PromoRepo::home_list(&state.pool).await?;
    Ok(response::ok("Promos retrieved successfully", promos))
}

/// GET /detail/{slug} -- public promo detail with linked cars.
pub async fn get_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let promo = PromoRepo::find_active_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::not_found("Promo", 0))?;
    Ok(response::ok("Promo retrieved successfully", promo))
}

/// GET / -- id/name list of active promos.
pub async fn get_all(State(state): State<AppState>, _user: AuthUser) -> AppResult<Response> {
    let promos = PromoRepo::list_id_name(&state.pool).await?;
    Ok(response::ok("Promos retrieved successfully", promos))
}

/// GET /{id} -- promo with linked cars.
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let promo = PromoRepo::find_active_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Promo", id))?;
    Ok(response::ok("Promo retrieved successfully", promo))
}

/// POST / -- paginated listing (auth), rows carry their linked cars.
pub async fn paginate(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(query): Json<PageQuery>,
) -> AppResult<Response> {
    let (rows, total) = PromoRepo::list_paginated(&state.pool, &query).await?;
    Ok(response::ok(
        "Promos retrieved successfully",
        Page::new(rows, total, &query),
    ))
}

/// POST /create -- create a promo (multipart, single `media` file required).
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_PROMOS_MANAGE).await?;

    let form = UploadForm::collect(&mut multipart, &state.config, None).await?;

    let fields = scalar_fields(&form)?;
    let car_ids: Vec<DbId> = form.json_array("cars")?;
    if !fields.is_global && car_ids.is_empty() {
        return Err(AppError::field(
            "cars",
            "The cars field is required when the promo is not global",
        ));
    }

    let file = form
        .files
        .first()
        .ok_or_else(|| AppError::field("media", "The media file is required"))?;

    if PromoRepo::slug_in_use(&state.pool, &fields.slug, None).await? {
        return Err(AppError::field("slug", "Slug already exists"));
    }

    let promo = PromoRepo::create(
        &state.pool,
        NewPromo {
            name: fields.name,
            slug: fields.slug,
            start_date: fields.start_date,
            end_date: fields.end_date,
            page: fields.page,
            media_url: file.url.clone(),
            media_type: file.media_type.as_str().to_string(),
            is_global: fields.is_global,
        },
        &car_ids,
    )
    .await?;

    Ok(response::created("Promo created successfully", promo))
}

/// PUT / -- update a promo (multipart).
///
/// A new `media` file replaces the stored one; otherwise `mediaFiles` must
/// signal that the existing upload is kept. A present `cars` array is
/// diff-synced; an absent one clears all links.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_PROMOS_MANAGE).await?;

    let form = UploadForm::collect(&mut multipart, &state.config, None).await?;

    let id: DbId = form
        .require_text("id")?
        .parse()
        .map_err(|_| AppError::field("id", "The id field must be an integer"))?;
    let fields = scalar_fields(&form)?;

    if form.files.is_empty() && !form.has_field("mediaFiles") {
        return Err(AppError::field("media", "The media file is required"));
    }

    let car_ids: Option<Vec<DbId>> = if form.has_field("cars") {
        Some(form.json_array("cars")?)
    } else {
        None
    };
    if !fields.is_global && car_ids.as_ref().is_none_or(|ids| ids.is_empty()) {
        return Err(AppError::field(
            "cars",
            "The cars field is required when the promo is not global",
        ));
    }

    if PromoRepo::slug_in_use(&state.pool, &fields.slug, Some(id)).await? {
        return Err(AppError::field("slug", "Slug already exists"));
    }

    let media = form
        .files
        .first()
        .map(|f| (f.url.as_str(), f.media_type.as_str()));
    let promo = PromoRepo::update(&state.pool, id, fields, media, car_ids.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("Promo", id))?;

    Ok(response::ok("Promo updated successfully", promo))
}

/// DELETE /{id} -- soft-delete a promo, freeing its slug.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_PROMOS_MANAGE).await?;

    if PromoRepo::soft_delete(&state.pool, id).await? {
        Ok(response::message_only("Promo deleted successfully"))
    } else {
        Err(AppError::not_found("Promo", id))
    }
}

fn scalar_fields(form: &UploadForm) -> AppResult<PromoFields> {
    let name = form.require_text("name")?.to_string();
    let slug = form.require_text("slug")?.to_string();
    let start_date = parse_date(form, "startDate")?;
    let end_date = parse_date(form, "endDate")?;
    let page = form.text("page").unwrap_or_default().to_string();
    let is_global = matches!(form.text("isGlobal"), Some("true") | Some("1"));

    if end_date < start_date {
        return Err(AppError::field(
            "endDate",
            "The endDate field must not be before startDate",
        ));
    }

    Ok(PromoFields {
        name,
        slug,
        start_date,
        end_date,
        page,
        is_global,
    })
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_date(form: &UploadForm, name: &str) -> AppResult<Timestamp> {
    let raw = form.require_text(name)?;
    raw.parse::<DateTime<Utc>>()
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        })
        .ok_or_else(|| AppError::field(name, &format!("The {name} field must be a valid date")))
}
