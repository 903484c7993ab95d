//! Root-level health endpoint, mounted outside the `/api/v1` tree so
//! load balancers can probe it without auth or the API envelope.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
}

/// GET /health -- liveness plus a database connectivity probe.
async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = showroom_db::health_check(&state.pool).await.is_ok();
    Json(HealthReport {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
