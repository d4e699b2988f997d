//! Genre repository implementation

use crate::database::store::Store;
use crate::models::{Event, Genre, GenreId};

impl Store {
    /// Find genre by name (case-sensitive)
    pub fn find_genre_by_name(&self, name: &str) -> Option<&Genre> {
        self.genres.values().find(|genre| genre.name == name)
    }

    pub fn genre_name_exists(&self, name: &str) -> bool {
        self.find_genre_by_name(name).is_some()
    }

    pub fn list_genres(&self) -> Vec<&Genre> {
        self.genres.values().collect()
    }

    /// Events tagged with a genre, in tagging order
    pub fn events_of_genre(&self, genre_id: GenreId) -> Vec<&Event> {
        self.event_ids_of_genre(genre_id)
            .iter()
            .filter_map(|event_id| self.events.get(*event_id))
            .collect()
    }
}
