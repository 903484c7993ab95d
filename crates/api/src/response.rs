//! Shared success envelope for API handlers.
//!
//! Every endpoint responds with `{ "status": bool, "message": String,
//! "data"?: T }`. Use these helpers instead of ad-hoc `json!` blocks so the
//! envelope cannot drift between handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 200 with a message and payload.
pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            status: true,
            message: message.into(),
            data: Some(data),
        }),
    )
        .into_response()
}

/// 201 with a message and payload.
pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(ApiResponse {
            status: true,
            message: message.into(),
            data: Some(data),
        }),
    )
        .into_response()
}

/// 200 with a message only.
pub fn message_only(message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::<()> {
            status: true,
            message: message.into(),
            data: None,
        }),
    )
        .into_response()
}
