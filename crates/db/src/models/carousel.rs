//! Carousel entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use showroom_core::types::{DbId, Timestamp};

/// A carousel row from the `carousels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Carousel {
    pub id: DbId,
    pub name: String,
    pub link: String,
    pub media_url: String,
    pub media_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a carousel.
#[derive(Debug, Clone)]
pub struct NewCarousel {
    pub name: String,
    pub link: String,
    pub media_url: String,
    pub media_type: String,
}
