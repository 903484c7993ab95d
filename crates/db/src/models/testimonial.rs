//! Testimonial (site comment) entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use showroom_core::types::{DbId, Timestamp};

use crate::models::car::CarIdName;

/// A testimonial row from the `testimonials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: DbId,
    pub car_id: DbId,
    pub name: String,
    pub message: String,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a testimonial.
#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub car_id: DbId,
    pub name: String,
    pub message: String,
    pub image_url: String,
}

/// Flat join row: testimonial columns plus the car name.
#[derive(Debug, Clone, FromRow)]
pub struct TestimonialCarRow {
    pub id: DbId,
    pub car_id: DbId,
    pub name: String,
    pub message: String,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub car_name: String,
}

/// A testimonial with its car attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialWithCar {
    #[serde(flatten)]
    pub testimonial: Testimonial,
    pub car: CarIdName,
}

impl From<TestimonialCarRow> for TestimonialWithCar {
    fn from(row: TestimonialCarRow) -> Self {
        TestimonialWithCar {
            car: CarIdName {
                id: row.car_id,
                name: row.car_name,
            },
            testimonial: Testimonial {
                id: row.id,
                car_id: row.car_id,
                name: row.name,
                message: row.message,
                image_url: row.image_url,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}
