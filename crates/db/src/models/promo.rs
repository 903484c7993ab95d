//! Promo entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use showroom_core::types::{DbId, Timestamp};

use crate::models::car::CarIdName;

/// A promo row from the `promos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Promo {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    /// Rich-text page body (HTML fragment).
    pub page: String,
    pub media_url: String,
    pub media_type: String,
    pub is_global: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a promo.
#[derive(Debug, Clone)]
pub struct NewPromo {
    pub name: String,
    pub slug: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub page: String,
    pub media_url: String,
    pub media_type: String,
    pub is_global: bool,
}

/// Scalar fields of a promo update. Media and car links are handled separately.
#[derive(Debug, Clone)]
pub struct PromoFields {
    pub name: String,
    pub slug: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub page: String,
    pub is_global: bool,
}

/// A promo with the cars it is linked to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoWithCars {
    #[serde(flatten)]
    pub promo: Promo,
    pub cars: Vec<CarIdName>,
}

/// Minimal id/name projection for selection lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromoIdName {
    pub id: DbId,
    pub name: String,
}

/// Home-list projection.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoHomeItem {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub media_url: String,
}
