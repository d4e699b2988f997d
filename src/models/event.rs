//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::{ClubId, EventId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub accepted: bool,
    pub finished: bool,
    pub club_id: Option<ClubId>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        !self.finished && self.event_date > now
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub club_id: Option<ClubId>,
    pub finished: bool,
}
