//! Favorite repository implementation

use crate::database::store::Store;
use crate::models::{Favorite, FavoriteId, UserId};

impl Store {
    /// Favorites of a user, in the order they were added
    pub fn favorites_of_user(&self, user_id: UserId) -> Vec<&Favorite> {
        self.favorite_event_ids_of_user(user_id)
            .iter()
            .filter_map(|event_id| self.favorites.get(FavoriteId::new(user_id, *event_id)))
            .collect()
    }

    /// Every favorite in ledger order (grouped by user, insertion order within a user)
    pub fn list_favorites(&self) -> Vec<&Favorite> {
        self.links
            .favorites
            .pairs()
            .filter_map(|(user_id, event_id)| self.favorites.get(FavoriteId::new(user_id, event_id)))
            .collect()
    }
}
