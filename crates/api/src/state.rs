use std::sync::Arc;

use notelet_db::DbPool;
use notelet_pages::PageLifecycle;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Page store connection pool.
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Page lifecycle manager.
    pub pages: PageLifecycle,
}
