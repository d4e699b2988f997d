//! Comment service implementation
//!
//! Creation, owner-scoped editing and removal, and ordered listings of event
//! comments. Edit and remove address a comment through its event, so a
//! comment id paired with the wrong event is reported as missing.

use std::sync::Arc;
use tracing::{debug, info};
use crate::config::Settings;
use crate::database::{DatabaseService, EntityStore, Store};
use crate::models::{Comment, CommentId, CommentOrder, Event, EventId, User, UserId};
use crate::services::auth::{Actor, AuthService, Operation};
use crate::utils::clock::Clock;
use crate::utils::errors::{EntityKind, EventHubError, Result};
use crate::utils::helpers::{is_blank, truncate_text};
use crate::utils::logging::log_comment_action;

/// Comment service for managing comment operations
#[derive(Clone)]
pub struct CommentService {
    database: DatabaseService,
    auth: AuthService,
    clock: Arc<dyn Clock>,
    settings: Settings,
}

impl CommentService {
    /// Create a new CommentService instance
    pub fn new(database: DatabaseService, auth: AuthService, clock: Arc<dyn Clock>, settings: Settings) -> Self {
        Self {
            database,
            auth,
            clock,
            settings,
        }
    }

    /// Comment on an event as the acting user
    pub async fn create(&self, actor: &Actor, event_id: EventId, text: &str) -> Result<Comment> {
        self.auth.authorize(actor, Operation::CreateComment, None)?;
        let user = actor.require_user()?;
        debug!(user_id = user.id, event_id = event_id, preview = %truncate_text(text, 40), "Creating comment");

        let mut store = self.database.write().await;
        store.require::<Event>(event_id)?;
        self.validate_text(text)?;

        let comment = store
            .associations()
            .attach_comment(event_id, user.id, text.to_string(), self.clock.now())?;
        log_comment_action(comment.id(), event_id, "created", user.id);
        Ok(comment)
    }

    /// Replace the text of a comment. Only its author may do this.
    pub async fn edit(&self, actor: &Actor, event_id: EventId, comment_id: CommentId, text: &str) -> Result<Comment> {
        let user = actor.require_user()?;
        debug!(user_id = user.id, event_id = event_id, comment_id = comment_id, "Editing comment");

        let mut store = self.database.write().await;
        let owner_id = Self::owner_of(&store, event_id, comment_id)?;
        self.auth.authorize(actor, Operation::EditComment, Some(owner_id))?;
        self.validate_text(text)?;

        let mut comment = store.require::<Comment>(comment_id)?.clone();
        comment.set_text(text.to_string());
        store.save(comment.clone())?;
        log_comment_action(comment_id, event_id, "edited", user.id);
        Ok(comment)
    }

    /// Remove a comment; the author or an admin may do this.
    /// Returns the detached comment.
    pub async fn remove(&self, actor: &Actor, event_id: EventId, comment_id: CommentId) -> Result<Comment> {
        let user = actor.require_user()?;
        debug!(user_id = user.id, event_id = event_id, comment_id = comment_id, "Removing comment");

        let mut store = self.database.write().await;
        let owner_id = Self::owner_of(&store, event_id, comment_id)?;
        self.auth.authorize(actor, Operation::DeleteComment, Some(owner_id))?;

        let comment = store.associations().detach_comment(comment_id)?;
        log_comment_action(comment_id, event_id, "removed", user.id);
        if owner_id != user.id {
            info!(admin_id = user.id, owner_id = owner_id, comment_id = comment_id, "Comment removed by moderator");
        }
        Ok(comment)
    }

    /// Comments of an event in the requested order
    pub async fn list_by_event(&self, event_id: EventId, order: CommentOrder) -> Result<Vec<Comment>> {
        debug!(event_id = event_id, order = ?order, "Listing event comments");
        let store = self.database.read().await;
        store.require::<Event>(event_id)?;
        Ok(store.comments_of_event(event_id, order).into_iter().cloned().collect())
    }

    /// Comments written by a user, oldest first
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Comment>> {
        debug!(user_id = user_id, "Listing user comments");
        let store = self.database.read().await;
        store.require::<User>(user_id)?;
        Ok(store.comments_of_user(user_id).into_iter().cloned().collect())
    }

    pub async fn find(&self, comment_id: CommentId) -> Result<Option<Comment>> {
        let store = self.database.read().await;
        Ok(store.find_by_id::<Comment>(comment_id).cloned())
    }

    /// Owner of a comment that must sit on the given event
    fn owner_of(store: &Store, event_id: EventId, comment_id: CommentId) -> Result<UserId> {
        store.require::<Event>(event_id)?;
        let comment = store
            .find_by_id::<Comment>(comment_id)
            .filter(|comment| comment.belongs_to_event(event_id))
            .ok_or_else(|| EventHubError::not_found(EntityKind::Comment, format!("{} on event {}", comment_id, event_id)))?;
        comment.user_id()
    }

    fn validate_text(&self, text: &str) -> Result<()> {
        if is_blank(text) {
            return Err(EventHubError::invalid("text", "comment text must not be empty"));
        }
        let max_length = self.settings.comments.max_length;
        if text.chars().count() > max_length {
            return Err(EventHubError::invalid(
                "text",
                format!("comment text exceeds {} characters", max_length),
            ));
        }
        Ok(())
    }
}
