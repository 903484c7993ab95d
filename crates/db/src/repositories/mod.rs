//! Repositories: zero-sized structs grouping the queries for one table group.

pub mod car_repo;
pub mod carousel_repo;
pub mod certificate_repo;
pub mod promo_repo;
pub mod tag_repo;
pub mod testimonial_repo;
pub mod user_repo;

pub use car_repo::CarRepo;
pub use carousel_repo::CarouselRepo;
pub use certificate_repo::CertificateRepo;
pub use promo_repo::PromoRepo;
pub use tag_repo::TagRepo;
pub use testimonial_repo::TestimonialRepo;
pub use user_repo::UserRepo;
