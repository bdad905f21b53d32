use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;

use notelet_api::config::ServerConfig;
use notelet_api::router::build_app_router;
use notelet_api::state::AppState;
use notelet_db::DbPool;
use notelet_pages::PageLifecycle;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        retention_days: 60,
        sweep_interval_secs: 86400,
        static_dir: "static".into(),
    }
}

/// Initialize a throwaway page store and open a pool over it.
pub async fn test_pool() -> (TempDir, DbPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pages.db");
    notelet_db::initialize_store(&path).await.expect("init");
    let pool = notelet_db::create_pool(&path).await.expect("pool");
    (dir, pool)
}

/// Build the full application router over the given pool, with the same
/// middleware stack production uses.
pub fn build_test_app(pool: DbPool) -> Router {
    let config = test_config();
    let pages = PageLifecycle::new(pool.clone());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        pages,
    };
    build_app_router(state, &config)
}
