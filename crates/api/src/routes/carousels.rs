use axum::routing::{get, post};
use axum::Router;

use crate::handlers::carousels;
use crate::state::AppState;

/// Carousel routes mounted at `/carousels`.
///
/// ```text
/// GET    /getHomeList -> get_home_list (public)
/// POST   /            -> paginate
/// PUT    /            -> update
/// POST   /create      -> create
/// GET    /{id}        -> get_by_id
/// DELETE /{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getHomeList", get(carousels::get_home_list))
        .route("/", post(carousels::paginate).put(carousels::update))
        .route("/create", post(carousels::create))
        .route(
            "/{id}",
            get(carousels::get_by_id).delete(carousels::delete),
        )
}
