//! Genre service implementation
//!
//! Admin-only genre catalogue management. Tagging and untagging go through
//! the association manager so both sides of the genre/event link change
//! together; deleting a genre first removes it from every event it tags.

use tracing::debug;
use crate::database::{DatabaseService, EntityStore};
use crate::models::{Event, EventId, Genre, GenreId};
use crate::services::auth::{Actor, AuthService, Operation};
use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers::is_blank;
use crate::utils::logging::{log_admin_action, log_genre_action};

/// Genre service for managing genres and event tags
#[derive(Clone)]
pub struct GenreService {
    database: DatabaseService,
    auth: AuthService,
}

impl GenreService {
    /// Create a new GenreService instance
    pub fn new(database: DatabaseService, auth: AuthService) -> Self {
        Self { database, auth }
    }

    /// Create a genre; names are unique and case-sensitive
    pub async fn create(&self, actor: &Actor, name: &str) -> Result<Genre> {
        self.auth.authorize(actor, Operation::ManageGenre, None)?;
        let name = Self::clean_name(name)?;

        let mut store = self.database.write().await;
        if store.genre_name_exists(&name) {
            return Err(EventHubError::Conflict(format!("genre '{}' already exists", name)));
        }
        let genre = Genre {
            id: store.next_id::<Genre>(),
            name,
        };
        store.save(genre.clone())?;

        log_genre_action(genre.id, "created", 0);
        Ok(genre)
    }

    pub async fn find(&self, genre_id: GenreId) -> Option<Genre> {
        self.database.read().await.find_by_id::<Genre>(genre_id).cloned()
    }

    pub async fn find_by_name(&self, name: &str) -> Option<Genre> {
        self.database.read().await.find_genre_by_name(name).cloned()
    }

    pub async fn list(&self) -> Vec<Genre> {
        self.database.read().await.list_genres().into_iter().cloned().collect()
    }

    pub async fn rename(&self, actor: &Actor, genre_id: GenreId, name: &str) -> Result<Genre> {
        self.auth.authorize(actor, Operation::ManageGenre, None)?;
        let name = Self::clean_name(name)?;

        let mut store = self.database.write().await;
        let mut genre = store.require::<Genre>(genre_id)?.clone();
        genre.name = name;
        store.save(genre.clone())?;

        log_genre_action(genre_id, "renamed", store.event_ids_of_genre(genre_id).len());
        Ok(genre)
    }

    /// Delete a genre after detaching it from every event it tags.
    /// Returns the ids of the events that lost the tag.
    pub async fn delete(&self, actor: &Actor, genre_id: GenreId) -> Result<Vec<EventId>> {
        self.auth.authorize(actor, Operation::ManageGenre, None)?;
        debug!(genre_id = genre_id, "Deleting genre");

        let mut store = self.database.write().await;
        store.require::<Genre>(genre_id)?;
        let detached = store.associations().detach_genre_everywhere(genre_id)?;
        store.delete::<Genre>(genre_id)?;

        log_genre_action(genre_id, "deleted", detached.len());
        if let Some(admin_id) = actor.user_id() {
            log_admin_action(admin_id, "delete_genre", Some(&genre_id.to_string()), None);
        }
        Ok(detached)
    }

    /// Tag an event with a genre
    pub async fn add_event(&self, actor: &Actor, genre_id: GenreId, event_id: EventId) -> Result<()> {
        self.auth.authorize(actor, Operation::ManageGenre, None)?;
        debug!(genre_id = genre_id, event_id = event_id, "Tagging event");

        let mut store = self.database.write().await;
        store.associations().attach_genre(genre_id, event_id)?;
        log_genre_action(genre_id, "tagged", 1);
        Ok(())
    }

    /// Remove a genre tag from an event
    pub async fn remove_event(&self, actor: &Actor, genre_id: GenreId, event_id: EventId) -> Result<()> {
        self.auth.authorize(actor, Operation::ManageGenre, None)?;
        debug!(genre_id = genre_id, event_id = event_id, "Untagging event");

        let mut store = self.database.write().await;
        store.associations().detach_genre(genre_id, event_id)?;
        log_genre_action(genre_id, "untagged", 1);
        Ok(())
    }

    /// Events tagged with a genre, in tagging order
    pub async fn events_of(&self, genre_id: GenreId) -> Result<Vec<Event>> {
        let store = self.database.read().await;
        store.require::<Genre>(genre_id)?;
        Ok(store.events_of_genre(genre_id).into_iter().cloned().collect())
    }

    fn clean_name(name: &str) -> Result<String> {
        if is_blank(name) {
            return Err(EventHubError::invalid("name", "genre name must not be empty"));
        }
        Ok(name.trim().to_string())
    }
}
