//! Comment model
//!
//! A comment belongs to exactly one user and one event. Both references are
//! fixed at creation and only cleared when the comment is detached on
//! removal; afterwards reading either side is an error.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::utils::errors::{EventHubError, Result};
use super::{CommentId, EventId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    text: String,
    created: DateTime<Utc>,
    user_id: Option<UserId>,
    event_id: Option<EventId>,
}

impl Comment {
    pub(crate) fn new(id: CommentId, text: String, created: DateTime<Utc>, user_id: UserId, event_id: EventId) -> Self {
        Self {
            id,
            text,
            created,
            user_id: Some(user_id),
            event_id: Some(event_id),
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Owning user, or `Detached` once the comment has been removed
    pub fn user_id(&self) -> Result<UserId> {
        self.user_id.ok_or(EventHubError::Detached {
            comment_id: self.id,
            side: "user",
        })
    }

    /// Owning event, or `Detached` once the comment has been removed
    pub fn event_id(&self) -> Result<EventId> {
        self.event_id.ok_or(EventHubError::Detached {
            comment_id: self.id,
            side: "event",
        })
    }

    pub fn is_detached(&self) -> bool {
        self.user_id.is_none() && self.event_id.is_none()
    }

    pub fn belongs_to_event(&self, event_id: EventId) -> bool {
        self.event_id == Some(event_id)
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == Some(user_id)
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn clear_user(&mut self) {
        self.user_id = None;
    }

    pub(crate) fn clear_event(&mut self) {
        self.event_id = None;
    }
}

/// Ordering for comment listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentOrder {
    /// Order in which comments were attached to the event
    Creation,
    /// Oldest first, ties broken by ascending id
    FromFirst,
    /// Newest first, ties broken by descending id
    FromLast,
}
