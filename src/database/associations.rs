//! Association manager
//!
//! Every bidirectional relationship (user/comment, event/comment,
//! genre/event, user/favorite, event/favorite) is changed here and nowhere
//! else. Each operation checks all of its preconditions before the first
//! write, and the writes that follow cannot fail, so callers never observe
//! a link that exists on one side only.

use chrono::{DateTime, Utc};
use crate::models::{
    Comment, CommentId, Event, EventId, Favorite, FavoriteId, Genre, GenreId, User, UserId,
};
use crate::utils::errors::{EntityKind, EventHubError, Result};
use super::store::Store;

/// What a cascading detach removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeverReport {
    pub comments: Vec<CommentId>,
    pub favorites: Vec<FavoriteId>,
    pub genres: Vec<GenreId>,
}

pub struct AssociationManager<'a> {
    store: &'a mut Store,
}

impl Store {
    /// Borrow the association manager for this store
    pub(crate) fn associations(&mut self) -> AssociationManager<'_> {
        AssociationManager { store: self }
    }
}

impl<'a> AssociationManager<'a> {
    /// Create a comment and append it to both the event's and the user's collections
    pub fn attach_comment(
        &mut self,
        event_id: EventId,
        user_id: UserId,
        text: String,
        created: DateTime<Utc>,
    ) -> Result<Comment> {
        self.store.require::<Event>(event_id)?;
        self.store.require::<User>(user_id)?;
        if text.trim().is_empty() {
            return Err(EventHubError::invalid("text", "comment text must not be empty"));
        }

        let id = self.store.comments.allocate_id();
        let comment = Comment::new(id, text, created, user_id, event_id);
        self.store.comments.insert(comment.clone());
        self.store.links.event_comments.link(event_id, id);
        self.store.links.user_comments.link(user_id, id);
        Ok(comment)
    }

    /// Remove a comment from both owning collections and delete it.
    /// The returned comment is detached.
    pub fn detach_comment(&mut self, comment_id: CommentId) -> Result<Comment> {
        let comment = self.store.require::<Comment>(comment_id)?;
        let user_id = comment.user_id()?;
        let event_id = comment.event_id()?;
        if !self.store.links.user_comments.contains(user_id, comment_id)
            || !self.store.links.event_comments.contains(event_id, comment_id)
        {
            return Err(EventHubError::Conflict(format!(
                "comment {} is not linked to user {} and event {}",
                comment_id, user_id, event_id
            )));
        }

        self.store.links.user_comments.unlink(user_id, comment_id);
        self.store.links.event_comments.unlink(event_id, comment_id);
        let mut removed = self
            .store
            .comments
            .remove(comment_id)
            .ok_or_else(|| EventHubError::not_found(EntityKind::Comment, comment_id))?;
        removed.clear_user();
        removed.clear_event();
        Ok(removed)
    }

    /// Tag an event with a genre on both sides
    pub fn attach_genre(&mut self, genre_id: GenreId, event_id: EventId) -> Result<()> {
        self.store.require::<Genre>(genre_id)?;
        self.store.require::<Event>(event_id)?;
        if !self.store.links.genre_events.link(genre_id, event_id) {
            return Err(EventHubError::Conflict(format!(
                "event {} is already tagged with genre {}",
                event_id, genre_id
            )));
        }
        Ok(())
    }

    /// Remove a genre tag from both sides
    pub fn detach_genre(&mut self, genre_id: GenreId, event_id: EventId) -> Result<()> {
        self.store.require::<Genre>(genre_id)?;
        self.store.require::<Event>(event_id)?;
        if !self.store.links.genre_events.unlink(genre_id, event_id) {
            return Err(EventHubError::not_found(
                EntityKind::Genre,
                format!("{} on event {}", genre_id, event_id),
            ));
        }
        Ok(())
    }

    /// Remove a genre from every event it tags. Nothing changes unless every
    /// tagged event resolves.
    pub fn detach_genre_everywhere(&mut self, genre_id: GenreId) -> Result<Vec<EventId>> {
        self.store.require::<Genre>(genre_id)?;
        let event_ids = self.store.event_ids_of_genre(genre_id).to_vec();
        for event_id in &event_ids {
            self.store.require::<Event>(*event_id)?;
        }

        Ok(self.store.links.genre_events.remove_left(genre_id))
    }

    /// Record a favorite under its composite key
    pub fn attach_favorite(
        &mut self,
        user_id: UserId,
        event_id: EventId,
        created_at: DateTime<Utc>,
    ) -> Result<Favorite> {
        self.store.require::<User>(user_id)?;
        self.store.require::<Event>(event_id)?;
        let id = FavoriteId::new(user_id, event_id);
        if self.store.favorites.contains(id) || self.store.links.favorites.contains(user_id, event_id) {
            return Err(EventHubError::Conflict(format!("favorite {} already exists", id)));
        }

        let favorite = Favorite { id, created_at };
        self.store.favorites.insert(favorite.clone());
        self.store.links.favorites.link(user_id, event_id);
        Ok(favorite)
    }

    /// Remove a favorite by composite key
    pub fn detach_favorite(&mut self, id: FavoriteId) -> Result<Favorite> {
        self.store.require::<Favorite>(id)?;
        self.store.links.favorites.unlink(id.user_id, id.event_id);
        self.store
            .favorites
            .remove(id)
            .ok_or_else(|| EventHubError::not_found(EntityKind::Favorite, id))
    }

    /// Detach and delete every comment and favorite owned by a user
    pub fn sever_user(&mut self, user_id: UserId) -> Result<SeverReport> {
        self.store.require::<User>(user_id)?;
        let comment_ids = self.store.comment_ids_of_user(user_id).to_vec();
        let favorite_ids: Vec<FavoriteId> = self
            .store
            .favorite_event_ids_of_user(user_id)
            .iter()
            .map(|event_id| FavoriteId::new(user_id, *event_id))
            .collect();
        self.verify_comments(&comment_ids)?;
        self.verify_favorites(&favorite_ids)?;

        for comment_id in &comment_ids {
            self.detach_comment(*comment_id)?;
        }
        for favorite_id in &favorite_ids {
            self.detach_favorite(*favorite_id)?;
        }
        Ok(SeverReport {
            comments: comment_ids,
            favorites: favorite_ids,
            genres: Vec::new(),
        })
    }

    /// Detach and delete every comment and favorite of an event and drop its genre tags
    pub fn sever_event(&mut self, event_id: EventId) -> Result<SeverReport> {
        self.store.require::<Event>(event_id)?;
        let comment_ids = self.store.comment_ids_of_event(event_id).to_vec();
        let favorite_ids: Vec<FavoriteId> = self
            .store
            .favoring_user_ids_of_event(event_id)
            .iter()
            .map(|user_id| FavoriteId::new(*user_id, event_id))
            .collect();
        let genre_ids = self.store.genre_ids_of_event(event_id).to_vec();
        self.verify_comments(&comment_ids)?;
        self.verify_favorites(&favorite_ids)?;

        for comment_id in &comment_ids {
            self.detach_comment(*comment_id)?;
        }
        for favorite_id in &favorite_ids {
            self.detach_favorite(*favorite_id)?;
        }
        self.store.links.genre_events.remove_right(event_id);
        Ok(SeverReport {
            comments: comment_ids,
            favorites: favorite_ids,
            genres: genre_ids,
        })
    }

    /// Re-insert a stored comment with its original id and relink it
    pub(crate) fn restore_comment(&mut self, comment: Comment) -> Result<()> {
        let user_id = comment.user_id()?;
        let event_id = comment.event_id()?;
        self.store.require::<User>(user_id)?;
        self.store.require::<Event>(event_id)?;
        if self.store.comments.contains(comment.id()) {
            return Err(EventHubError::Conflict(format!("comment {} already exists", comment.id())));
        }

        let id = comment.id();
        self.store.comments.insert(comment);
        self.store.comments.set_last_id(id);
        self.store.links.event_comments.link(event_id, id);
        self.store.links.user_comments.link(user_id, id);
        Ok(())
    }

    fn verify_comments(&self, comment_ids: &[CommentId]) -> Result<()> {
        for comment_id in comment_ids {
            let comment = self.store.require::<Comment>(*comment_id)?;
            comment.user_id()?;
            comment.event_id()?;
        }
        Ok(())
    }

    fn verify_favorites(&self, favorite_ids: &[FavoriteId]) -> Result<()> {
        for favorite_id in favorite_ids {
            self.store.require::<Favorite>(*favorite_id)?;
        }
        Ok(())
    }
}
