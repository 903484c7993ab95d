//! Request handlers, one module per resource.

pub mod auth;
pub mod carousels;
pub mod cars;
pub mod certificates;
pub mod comments;
pub mod promos;
pub mod sitemap;
pub mod tags;
