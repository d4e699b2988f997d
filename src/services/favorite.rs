//! Favorite service implementation
//!
//! The favorite ledger: at most one favorite per (user, event) pair, created
//! only when both sides exist and removed by composite key.

use std::sync::Arc;
use tracing::debug;
use crate::database::{DatabaseService, EntityStore};
use crate::models::{Event, EventId, Favorite, FavoriteId, User, UserId};
use crate::services::auth::{Actor, AuthService, Operation};
use crate::utils::clock::Clock;
use crate::utils::errors::Result;
use crate::utils::logging::log_favorite_action;

/// Favorite service for managing the favorite ledger
#[derive(Clone)]
pub struct FavoriteService {
    database: DatabaseService,
    auth: AuthService,
    clock: Arc<dyn Clock>,
}

impl FavoriteService {
    /// Create a new FavoriteService instance
    pub fn new(database: DatabaseService, auth: AuthService, clock: Arc<dyn Clock>) -> Self {
        Self { database, auth, clock }
    }

    /// Favorite an event on behalf of `user_id`.
    ///
    /// Users manage their own favorites; admins may act for anyone.
    pub async fn add_favorite(&self, actor: &Actor, user_id: UserId, event_id: EventId) -> Result<Favorite> {
        self.auth.authorize(actor, Operation::AddFavorite, Some(user_id))?;
        debug!(user_id = user_id, event_id = event_id, "Adding favorite");

        let mut store = self.database.write().await;
        let favorite = store
            .associations()
            .attach_favorite(user_id, event_id, self.clock.now())?;
        log_favorite_action(user_id, event_id, "added");
        Ok(favorite)
    }

    /// Remove a favorite by its composite key
    pub async fn remove_favorite(&self, actor: &Actor, key: FavoriteId) -> Result<Favorite> {
        self.auth.authorize(actor, Operation::RemoveFavorite, Some(key.user_id))?;
        debug!(favorite = %key, "Removing favorite");

        let mut store = self.database.write().await;
        let favorite = store.associations().detach_favorite(key)?;
        log_favorite_action(key.user_id, key.event_id, "removed");
        Ok(favorite)
    }

    pub async fn exists(&self, key: FavoriteId) -> bool {
        self.database.read().await.exists_by_id::<Favorite>(key)
    }

    pub async fn find(&self, key: FavoriteId) -> Option<Favorite> {
        self.database.read().await.find_by_id::<Favorite>(key).cloned()
    }

    /// Favorited events of a user, in the order they were added
    pub async fn list_favorite_events(&self, user_id: UserId) -> Result<Vec<Event>> {
        debug!(user_id = user_id, "Listing favorite events");
        let store = self.database.read().await;
        store.require::<User>(user_id)?;
        Ok(store.favorite_events_of_user(user_id).into_iter().cloned().collect())
    }

    /// Favorite records of a user, in the order they were added
    pub async fn list_favorites(&self, user_id: UserId) -> Result<Vec<Favorite>> {
        let store = self.database.read().await;
        store.require::<User>(user_id)?;
        Ok(store.favorites_of_user(user_id).into_iter().cloned().collect())
    }
}
