use axum::routing::{get, post};
use axum::Router;

use crate::handlers::promos;
use crate::state::AppState;

/// Promo routes mounted at `/promos`.
///
/// ```text
/// GET    /getHomeList    -> get_home_list (public)
/// GET    /detail/{slug}  -> get_detail    (public)
/// GET    /               -> get_all
/// POST   /               -> paginate
/// PUT    /               -> update
/// POST   /create         -> create
/// GET    /{id}           -> get_by_id
/// DELETE /{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getHomeList", get(promos::get_home_list))
        .route("/detail/{slug}", get(promos::get_detail))
        .route(
            "/",
            get(promos::get_all)
                .post(promos::paginate)
                .put(promos::update),
        )
        .route("/create", post(promos::create))
        .route("/{id}", get(promos::get_by_id).delete(promos::delete))
}
