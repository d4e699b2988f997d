//! Store handle management

use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::config::StorageConfig;
use crate::utils::errors::Result;
use super::snapshot::load_snapshot;
use super::store::Store;

/// Store shared between services; every operation takes the lock once
pub type SharedStore = Arc<RwLock<Store>>;

/// Create the shared store, restoring the configured snapshot when present
pub async fn create_store(config: &StorageConfig) -> Result<SharedStore> {
    let store = match &config.snapshot_path {
        Some(path) => load_snapshot(Path::new(path)).await?.unwrap_or_else(|| {
            tracing::info!(path = %path, "Starting with an empty store");
            Store::new()
        }),
        None => {
            tracing::info!("No snapshot path configured, using an in-memory store");
            Store::new()
        }
    };

    Ok(Arc::new(RwLock::new(store)))
}

/// Check that the store lock can be acquired
pub async fn health_check(store: &SharedStore) -> Result<()> {
    let guard = store.read().await;
    tracing::debug!(stats = ?guard.stats(), "Store health check");
    Ok(())
}
