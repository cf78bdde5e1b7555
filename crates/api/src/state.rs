use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::developer::DeveloperService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: catfacts_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Developer records together with their uploaded images.
    pub developers: DeveloperService,
}

impl AppState {
    /// Wire up state from an open pool, creating the developer upload store
    /// under the configured upload directory.
    pub fn new(pool: catfacts_db::DbPool, config: ServerConfig) -> Self {
        let files = catfacts_core::file_store::FileStore::new(
            config.developer_upload_dir(),
            &ServerConfig::developer_upload_prefix(),
        );
        Self {
            developers: DeveloperService::new(pool.clone(), files),
            pool,
            config: Arc::new(config),
        }
    }
}
