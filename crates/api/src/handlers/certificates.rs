//! Certificate handlers.
//!
//! Certificates are a single replace-style set: the public endpoint lists
//! them, and one authenticated PUT syncs the whole collection.

use axum::extract::{Multipart, State};
use axum::response::Response;

use showroom_core::permissions::PERM_CERTIFICATES_MANAGE;
use showroom_core::types::DbId;
use showroom_db::models::certificate::NewCertificate;
use showroom_db::repositories::CertificateRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::permission::authorize;
use crate::response;
use crate::state::AppState;
use crate::upload::UploadForm;

/// GET / -- public list of active certificates, oldest first.
pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    let certificates = CertificateRepo::list_active(&state.pool).await?;
    Ok(response::ok(
        "Certificates retrieved successfully",
        certificates,
    ))
}

/// PUT / -- replace-style sync (multipart): keep the ids in `mediaFiles`,
/// soft-delete the rest, insert one row per uploaded file.
pub async fn sync(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Response> {
    authorize(&state.pool, &user, PERM_CERTIFICATES_MANAGE).await?;

    let form = UploadForm::collect(&mut multipart, &state.config, None).await?;
    let keep_ids: Vec<DbId> = form.json_array("mediaFiles")?;

    if form.files.is_empty() && keep_ids.is_empty() {
        return Err(AppError::field(
            "media",
            "At least one media file is required",
        ));
    }

    let new_items: Vec<NewCertificate> = form
        .files
        .iter()
        .map(|f| NewCertificate {
            certificate_type: f.media_type.as_str().to_string(),
            url: f.url.clone(),
        })
        .collect();

    let certificates = CertificateRepo::sync(&state.pool, &keep_ids, &new_items).await?;
    Ok(response::ok(
        "Certificates updated successfully",
        certificates,
    ))
}
