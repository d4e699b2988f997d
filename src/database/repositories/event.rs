//! Event repository implementation

use chrono::{DateTime, Utc};
use crate::database::store::Store;
use crate::models::{ClubId, Event, EventId, Genre, GenreId, UserId};

impl Store {
    /// List all events in id order
    pub fn list_events(&self) -> Vec<&Event> {
        self.events.values().collect()
    }

    /// Events still waiting for admin acceptance
    pub fn events_not_accepted(&self) -> Vec<&Event> {
        self.events.values().filter(|event| !event.accepted).collect()
    }

    /// Events accepted for a club
    pub fn events_by_club(&self, club_id: ClubId) -> Vec<&Event> {
        self.events
            .values()
            .filter(|event| event.club_id == Some(club_id))
            .collect()
    }

    pub fn events_not_finished(&self) -> Vec<&Event> {
        self.events.values().filter(|event| !event.finished).collect()
    }

    /// Upcoming events tagged with any of the given genres, soonest first
    pub fn upcoming_events_by_genres(&self, genre_ids: &[GenreId], now: DateTime<Utc>) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .events
            .values()
            .filter(|event| event.is_upcoming(now))
            .filter(|event| {
                self.genre_ids_of_event(event.id)
                    .iter()
                    .any(|genre_id| genre_ids.contains(genre_id))
            })
            .collect();
        events.sort_by(|a, b| a.event_date.cmp(&b.event_date).then(a.id.cmp(&b.id)));
        events
    }

    /// Genres tagging an event, in tagging order
    pub fn genres_of_event(&self, event_id: EventId) -> Vec<&Genre> {
        self.genre_ids_of_event(event_id)
            .iter()
            .filter_map(|genre_id| self.genres.get(*genre_id))
            .collect()
    }

    /// Events a user marked as favorite, in the order they were added
    pub fn favorite_events_of_user(&self, user_id: UserId) -> Vec<&Event> {
        self.favorite_event_ids_of_user(user_id)
            .iter()
            .filter_map(|event_id| self.events.get(*event_id))
            .collect()
    }
}
