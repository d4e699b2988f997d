//! Database service layer
//!
//! This module provides a high-level handle over the shared store: guarded
//! read and write access for the services, plus snapshot persistence.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;
use crate::config::StorageConfig;
use crate::utils::errors::Result;
use super::connection::{create_store, health_check, SharedStore};
use super::snapshot::save_snapshot;
use super::store::{Store, StoreStats};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    store: SharedStore,
    snapshot_path: Option<PathBuf>,
}

impl DatabaseService {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            snapshot_path: None,
        }
    }

    /// Empty store with no persistence
    pub fn in_memory() -> Self {
        Self::new(Store::new())
    }

    /// Open the store described by the storage configuration
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        let store = create_store(config).await?;
        Ok(Self {
            store,
            snapshot_path: config.snapshot_path.as_ref().map(PathBuf::from),
        })
    }

    /// Shared read access; many readers may hold it at once
    pub async fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read().await
    }

    /// Exclusive access for one mutating operation
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.store.write().await
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Write a snapshot if a path is configured; returns whether one was written
    pub async fn persist(&self) -> Result<bool> {
        let Some(path) = &self.snapshot_path else {
            debug!("Persist requested without a snapshot path");
            return Ok(false);
        };
        let store = self.store.read().await;
        save_snapshot(&store, path).await?;
        Ok(true)
    }

    /// Get store statistics
    pub async fn stats(&self) -> StoreStats {
        self.store.read().await.stats()
    }

    pub async fn health_check(&self) -> Result<()> {
        health_check(&self.store).await
    }
}
