//! Car entity model plus its owned children (variants, media files) and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use showroom_core::types::{DbId, Timestamp};

use crate::models::promo::Promo;
use crate::models::testimonial::Testimonial;

/// A car row from the `cars` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Rich-text page body (HTML fragment).
    pub page: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a car.
#[derive(Debug, Clone)]
pub struct NewCar {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub page: String,
}

/// Scalar fields of a car update. Relations are reconciled separately.
#[derive(Debug, Clone)]
pub struct CarFields {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub page: String,
}

/// Minimal id/name projection, used by selection lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CarIdName {
    pub id: DbId,
    pub name: String,
}

/// A variant row. `price` is `NUMERIC(12,2)` in the database and is cast to
/// `FLOAT8` in every query so it serializes as a JSON number.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: DbId,
    pub car_id: DbId,
    pub name: String,
    pub price: f64,
}

/// Incoming variant in a car create/update payload. An absent `id` means
/// "insert"; a present one means "update in place".
#[derive(Debug, Clone, Deserialize)]
pub struct VariantInput {
    #[serde(default)]
    pub id: Option<DbId>,
    pub name: String,
    pub price: f64,
}

/// A stored upload attached to a car.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    pub id: DbId,
    pub car_id: DbId,
    pub url: String,
    pub media_type: String,
}

/// DTO for attaching a freshly stored upload.
#[derive(Debug, Clone)]
pub struct NewMediaFile {
    pub url: String,
    pub media_type: String,
}

/// Tag projection embedded in car payloads.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagRef {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}

/// Summary row for the home list and paginated car listings: the car plus its
/// active variants, tags, first media URL and derived price stats.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSummary {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub created_at: Timestamp,
    pub media_url: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub total_variants: i64,
    pub variants: Vec<Variant>,
    pub tags: Vec<TagRef>,
}

/// Full public detail payload: car row, relations, and the merged promo list
/// (car-linked promos first, then currently-global promos not already linked).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDetail {
    #[serde(flatten)]
    pub car: Car,
    pub tags: Vec<TagRef>,
    pub variants: Vec<Variant>,
    pub media_files: Vec<MediaFile>,
    pub testimonials: Vec<Testimonial>,
    pub promos: Vec<Promo>,
}

/// Admin edit payload: the car with tag ids, variants and media files.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarEditDetail {
    #[serde(flatten)]
    pub car: Car,
    pub tag_ids: Vec<DbId>,
    pub variants: Vec<Variant>,
    pub media_files: Vec<MediaFile>,
}
