use axum::routing::get;
use axum::Router;

use crate::handlers::certificates;
use crate::state::AppState;

/// Certificate routes mounted at `/certificates`.
///
/// ```text
/// GET /  -> list (public)
/// PUT /  -> sync
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(certificates::list).put(certificates::sync))
}
