use axum::routing::{get, post};
use axum::Router;

use crate::handlers::cars;
use crate::state::AppState;

/// Car routes mounted at `/cars`.
///
/// ```text
/// GET    /getHomeList    -> get_home_list   (public)
/// GET    /list           -> get_list        (public)
/// GET    /detail/{slug}  -> get_detail      (public)
/// GET    /               -> get_all
/// POST   /               -> paginate
/// PUT    /               -> update
/// POST   /create         -> create
/// GET    /{id}           -> get_by_id
/// DELETE /{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getHomeList", get(cars::get_home_list))
        .route("/list", get(cars::get_list))
        .route("/detail/{slug}", get(cars::get_detail))
        .route(
            "/",
            get(cars::get_all).post(cars::paginate).put(cars::update),
        )
        .route("/create", post(cars::create))
        .route("/{id}", get(cars::get_by_id).delete(cars::delete))
}
