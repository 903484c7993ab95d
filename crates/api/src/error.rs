use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use showroom_core::error::CoreError;

/// Field-keyed validation error map, rendered under `errors` in 422 bodies.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Message used for every 422 response.
pub const INVALID_DATA_MESSAGE: &str = "The given data was invalid";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the project's JSON error envelope:
/// `{ "status": false, "message": ..., "errors"?: {field: [msgs]} }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `showroom_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid request data, rendered as a 422 with a field error map.
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// A 422 carrying a single field error.
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        AppError::Validation(errors)
    }

    /// A 404 for the given entity. Slug-based lookups pass `0` as the id.
    pub fn not_found(entity: &'static str, id: showroom_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut map = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("The {field} field is invalid"))
                })
                .collect();
            map.insert(field.to_string(), messages);
        }
        AppError::Validation(map)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => {
                    (StatusCode::NOT_FOUND, format!("{entity} not found"), None)
                }
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone(), None),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal Server Error".to_string(),
                        None,
                    )
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Validation(map) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                INVALID_DATA_MESSAGE.to_string(),
                Some(map.clone()),
            ),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    None,
                )
            }
        };

        let body = match errors {
            Some(errors) => json!({
                "status": false,
                "message": message,
                "errors": errors,
            }),
            None => json!({
                "status": false,
                "message": message,
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into a status, message, and optional field errors.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to
///   a 422 keyed on the constrained column, matching the slug pre-check path.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String, Option<FieldErrors>) {
    match err {
        sqlx::Error::RowNotFound => {
            (StatusCode::NOT_FOUND, "Resource not found".to_string(), None)
        }
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    // `uq_cars_slug` -> field `slug`
                    let field = constraint.rsplit('_').next().unwrap_or("value");
                    let mut errors = FieldErrors::new();
                    errors.insert(
                        field.to_string(),
                        vec![format!("{} already exists", capitalize(field))],
                    );
                    return (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        INVALID_DATA_MESSAGE.to_string(),
                        Some(errors),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
                None,
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
                None,
            )
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
