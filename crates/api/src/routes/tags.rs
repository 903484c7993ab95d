use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Tag routes mounted at `/tags`.
///
/// ```text
/// GET    /        -> list (public)
/// POST   /        -> paginate
/// PUT    /        -> update
/// POST   /create  -> create
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(tags::list).post(tags::paginate).put(tags::update),
        )
        .route("/create", post(tags::create))
        .route("/{id}", delete(tags::delete))
}
