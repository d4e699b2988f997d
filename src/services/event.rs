//! Event service implementation
//!
//! Events are stored as plain records. Admins accept them for a club and may
//! delete them; deletion detaches every comment, favorite and genre tag
//! before the record goes.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use crate::database::{DatabaseService, EntityStore};
use crate::models::{ClubId, CreateEventRequest, Event, EventId, Genre, GenreId};
use crate::services::auth::{Actor, AuthService, Operation};
use crate::utils::clock::Clock;
use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers::{is_blank, normalize_whitespace};
use crate::utils::logging::log_admin_action;

/// Event service for managing event records
#[derive(Clone)]
pub struct EventService {
    database: DatabaseService,
    auth: AuthService,
    clock: Arc<dyn Clock>,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(database: DatabaseService, auth: AuthService, clock: Arc<dyn Clock>) -> Self {
        Self { database, auth, clock }
    }

    /// Store a new, not yet accepted event
    pub async fn save(&self, request: CreateEventRequest) -> Result<Event> {
        if is_blank(&request.title) {
            return Err(EventHubError::invalid("title", "event title must not be empty"));
        }

        let mut store = self.database.write().await;
        let event = Event {
            id: store.next_id::<Event>(),
            title: normalize_whitespace(&request.title),
            event_date: request.event_date,
            accepted: false,
            finished: request.finished,
            club_id: request.club_id,
            created_at: self.clock.now(),
        };
        store.save(event.clone())?;

        info!(event_id = event.id, title = %event.title, "Event saved");
        Ok(event)
    }

    pub async fn find(&self, event_id: EventId) -> Option<Event> {
        self.database.read().await.find_by_id::<Event>(event_id).cloned()
    }

    pub async fn list(&self) -> Vec<Event> {
        self.database.read().await.list_events().into_iter().cloned().collect()
    }

    /// Accept an event for a club
    pub async fn accept_event(&self, actor: &Actor, event_id: EventId, club_id: ClubId) -> Result<Event> {
        self.auth.authorize(actor, Operation::AcceptEvent, None)?;
        debug!(event_id = event_id, club_id = club_id, "Accepting event");

        let mut store = self.database.write().await;
        let mut event = store.require::<Event>(event_id)?.clone();
        event.accepted = true;
        event.club_id = Some(club_id);
        store.save(event.clone())?;

        if let Some(admin_id) = actor.user_id() {
            log_admin_action(admin_id, "accept_event", Some(&event_id.to_string()), Some(&format!("club {}", club_id)));
        }
        Ok(event)
    }

    /// Delete an event with all of its comments, favorites and genre tags
    pub async fn delete(&self, actor: &Actor, event_id: EventId) -> Result<Event> {
        self.auth.authorize(actor, Operation::DeleteEvent, None)?;
        debug!(event_id = event_id, "Deleting event");

        let mut store = self.database.write().await;
        store.require::<Event>(event_id)?;
        let report = store.associations().sever_event(event_id)?;
        let event = store.delete::<Event>(event_id)?;

        info!(
            event_id = event_id,
            comments = report.comments.len(),
            favorites = report.favorites.len(),
            genres = report.genres.len(),
            "Event deleted"
        );
        if let Some(admin_id) = actor.user_id() {
            log_admin_action(admin_id, "delete_event", Some(&event_id.to_string()), None);
        }
        Ok(event)
    }

    pub async fn not_accepted(&self) -> Vec<Event> {
        self.database.read().await.events_not_accepted().into_iter().cloned().collect()
    }

    pub async fn by_club(&self, club_id: ClubId) -> Vec<Event> {
        self.database.read().await.events_by_club(club_id).into_iter().cloned().collect()
    }

    pub async fn not_finished(&self) -> Vec<Event> {
        self.database.read().await.events_not_finished().into_iter().cloned().collect()
    }

    /// Upcoming events tagged with any of `genre_ids`, soonest first
    pub async fn upcoming_by_genres(&self, genre_ids: &[GenreId], now: DateTime<Utc>) -> Vec<Event> {
        self.database
            .read()
            .await
            .upcoming_events_by_genres(genre_ids, now)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Genres tagging an event, in tagging order
    pub async fn genres_of(&self, event_id: EventId) -> Result<Vec<Genre>> {
        let store = self.database.read().await;
        store.require::<Event>(event_id)?;
        Ok(store.genres_of_event(event_id).into_iter().cloned().collect())
    }
}
