use std::sync::Arc;

use showroom_db::DbPool;

use crate::config::ServerConfig;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}
