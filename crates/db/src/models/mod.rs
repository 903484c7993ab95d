//! Entity models and DTOs, one module per table group.

pub mod car;
pub mod carousel;
pub mod certificate;
pub mod promo;
pub mod tag;
pub mod testimonial;
pub mod user;
