//! Favorite model
//!
//! Favorites carry no surrogate id: the `(user_id, event_id)` pair is the key.

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::{EventId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FavoriteId {
    pub user_id: UserId,
    pub event_id: EventId,
}

impl FavoriteId {
    pub fn new(user_id: UserId, event_id: EventId) -> Self {
        Self { user_id, event_id }
    }
}

impl fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.user_id, self.event_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn user_id(&self) -> UserId {
        self.id.user_id
    }

    pub fn event_id(&self) -> EventId {
        self.id.event_id
    }
}
