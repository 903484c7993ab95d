//! Tag entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use showroom_core::types::{DbId, Timestamp};

/// A tag row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Minimal id/name projection for the public tag list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagIdName {
    pub id: DbId,
    pub name: String,
}
