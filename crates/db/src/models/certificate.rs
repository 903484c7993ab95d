//! Certificate entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use showroom_core::types::{DbId, Timestamp};

/// A certificate row from the `certificates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: DbId,
    #[serde(rename = "type")]
    pub certificate_type: String,
    pub url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a certificate.
#[derive(Debug, Clone)]
pub struct NewCertificate {
    pub certificate_type: String,
    pub url: String,
}
