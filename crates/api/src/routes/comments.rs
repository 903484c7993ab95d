use axum::routing::{get, post};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Testimonial routes mounted at `/comments`.
///
/// ```text
/// GET    /getHomeList -> get_home_list   (public)
/// GET    /            -> get_car_options
/// POST   /            -> paginate
/// PUT    /            -> update
/// POST   /create      -> create
/// GET    /{id}        -> get_by_id
/// DELETE /{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getHomeList", get(comments::get_home_list))
        .route(
            "/",
            get(comments::get_car_options)
                .post(comments::paginate)
                .put(comments::update),
        )
        .route("/create", post(comments::create))
        .route("/{id}", get(comments::get_by_id).delete(comments::delete))
}
