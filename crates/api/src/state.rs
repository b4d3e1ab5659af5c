use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::config::AppConfig;
use mongovault_db::ProfileStore;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`. Cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Live or kiosk profile store, resolved once at startup.
    pub store: Arc<ProfileStore>,
    /// Server configuration.
    pub config: Arc<AppConfig>,
    /// Admission limit for concurrent dump/restore subprocesses.
    pub transfer_permits: Arc<Semaphore>,
}

impl AppState {
    pub fn new(store: ProfileStore, config: AppConfig) -> Self {
        let transfer_permits = Arc::new(Semaphore::new(config.max_concurrent_transfers));
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            transfer_permits,
        }
    }
}
