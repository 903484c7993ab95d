//! Route definitions, one module per resource.

pub mod auth;
pub mod carousels;
pub mod cars;
pub mod certificates;
pub mod comments;
pub mod health;
pub mod promos;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/cars", cars::router())
        .nest("/tags", tags::router())
        .nest("/promos", promos::router())
        .nest("/carousels", carousels::router())
        .nest("/comments", comments::router())
        .nest("/certificates", certificates::router())
}
