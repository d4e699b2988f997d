//! Database module
//!
//! This module holds the in-process entity store, the association manager
//! that owns every bidirectional link, and snapshot persistence.

pub mod associations;
pub mod connection;
pub mod relation;
pub mod repositories;
pub mod service;
pub mod snapshot;
pub mod store;

// Re-export commonly used database components
pub use associations::{AssociationManager, SeverReport};
pub use connection::{create_store, health_check, SharedStore};
pub use relation::Relation;
pub use service::DatabaseService;
pub use snapshot::{load_snapshot, save_snapshot, Snapshot};
pub use store::{Entity, EntityStore, Store, StoreStats, Table};
