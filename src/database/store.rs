//! In-process entity store
//!
//! `Store` keeps one table per entity type plus the association indices.
//! Tables can be read by anyone holding a `&Store`; rows are inserted or
//! removed only from inside the `database` module, and link indices are
//! written only by the association manager.

use std::collections::BTreeMap;
use std::fmt;
use serde::Serialize;
use crate::models::{
    Comment, CommentId, Event, EventId, Favorite, FavoriteId, Genre, GenreId, User, UserId,
};
use crate::utils::errors::{EntityKind, EventHubError, Result};
use super::relation::Relation;

/// A stored entity with its own table in the `Store`
pub trait Entity: Clone {
    type Id: Ord + Copy + fmt::Display + fmt::Debug;

    const KIND: EntityKind;

    fn id(&self) -> Self::Id;

    fn table(store: &Store) -> &Table<Self>;

    fn table_mut(store: &mut Store) -> &mut Table<Self>;

    /// Whether the entity still takes part in any association
    fn has_links(store: &Store, id: Self::Id) -> bool;

    /// Constraints checked before a plain `save`
    fn check_save(&self, _store: &Store) -> Result<()> {
        Ok(())
    }
}

/// Entity store contract used by the services
pub trait EntityStore {
    fn find_by_id<E: Entity>(&self, id: E::Id) -> Option<&E>;

    fn exists_by_id<E: Entity>(&self, id: E::Id) -> bool {
        self.find_by_id::<E>(id).is_some()
    }

    /// Insert or replace a row after its save constraints pass
    fn save<E: Entity>(&mut self, entity: E) -> Result<E::Id>;

    /// Remove a row; fails while the entity is still linked
    fn delete<E: Entity>(&mut self, id: E::Id) -> Result<E>;
}

/// Rows of one entity type, keyed by id
#[derive(Debug, Clone)]
pub struct Table<E: Entity> {
    rows: BTreeMap<E::Id, E>,
    last_id: i64,
}

impl<E: Entity> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<E: Entity> Table<E> {
    pub fn get(&self, id: E::Id) -> Option<&E> {
        self.rows.get(&id)
    }

    pub fn contains(&self, id: E::Id) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in ascending id order
    pub fn values(&self) -> impl Iterator<Item = &E> {
        self.rows.values()
    }

    pub fn last_id(&self) -> i64 {
        self.last_id
    }

    pub(super) fn get_mut(&mut self, id: E::Id) -> Option<&mut E> {
        self.rows.get_mut(&id)
    }

    pub(super) fn insert(&mut self, entity: E) -> Option<E> {
        self.rows.insert(entity.id(), entity)
    }

    pub(super) fn remove(&mut self, id: E::Id) -> Option<E> {
        self.rows.remove(&id)
    }

    pub(super) fn set_last_id(&mut self, last_id: i64) {
        self.last_id = self.last_id.max(last_id);
    }
}

impl<E: Entity<Id = i64>> Table<E> {
    pub(super) fn allocate_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// Association indices; written only through the association manager
#[derive(Debug, Clone, Default)]
pub(super) struct Links {
    pub(super) user_comments: Relation<UserId, CommentId>,
    pub(super) event_comments: Relation<EventId, CommentId>,
    pub(super) genre_events: Relation<GenreId, EventId>,
    pub(super) favorites: Relation<UserId, EventId>,
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(super) users: Table<User>,
    pub(super) events: Table<Event>,
    pub(super) genres: Table<Genre>,
    pub(super) comments: Table<Comment>,
    pub(super) favorites: Table<Favorite>,
    pub(super) links: Links,
}

/// Row and link counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub users: usize,
    pub events: usize,
    pub genres: usize,
    pub comments: usize,
    pub favorites: usize,
    pub genre_links: usize,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &Table<User> {
        &self.users
    }

    pub fn events(&self) -> &Table<Event> {
        &self.events
    }

    pub fn genres(&self) -> &Table<Genre> {
        &self.genres
    }

    pub fn comments(&self) -> &Table<Comment> {
        &self.comments
    }

    pub fn favorites(&self) -> &Table<Favorite> {
        &self.favorites
    }

    /// Reserve the next surrogate id for an entity type
    pub(crate) fn next_id<E: Entity<Id = i64>>(&mut self) -> i64 {
        E::table_mut(self).allocate_id()
    }

    /// Fetch an entity or fail with `NotFound`
    pub fn require<E: Entity>(&self, id: E::Id) -> Result<&E> {
        self.find_by_id::<E>(id)
            .ok_or_else(|| EventHubError::not_found(E::KIND, id))
    }

    pub fn comment_ids_of_event(&self, event_id: EventId) -> &[CommentId] {
        self.links.event_comments.right_of(event_id)
    }

    pub fn comment_ids_of_user(&self, user_id: UserId) -> &[CommentId] {
        self.links.user_comments.right_of(user_id)
    }

    pub fn genre_ids_of_event(&self, event_id: EventId) -> &[GenreId] {
        self.links.genre_events.left_of(event_id)
    }

    pub fn event_ids_of_genre(&self, genre_id: GenreId) -> &[EventId] {
        self.links.genre_events.right_of(genre_id)
    }

    /// Favorited event ids of a user, in the order they were added
    pub fn favorite_event_ids_of_user(&self, user_id: UserId) -> &[EventId] {
        self.links.favorites.right_of(user_id)
    }

    pub fn favoring_user_ids_of_event(&self, event_id: EventId) -> &[UserId] {
        self.links.favorites.left_of(event_id)
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            users: self.users.len(),
            events: self.events.len(),
            genres: self.genres.len(),
            comments: self.comments.len(),
            favorites: self.favorites.len(),
            genre_links: self.links.genre_events.len(),
        }
    }
}

impl EntityStore for Store {
    fn find_by_id<E: Entity>(&self, id: E::Id) -> Option<&E> {
        E::table(self).get(id)
    }

    fn save<E: Entity>(&mut self, entity: E) -> Result<E::Id> {
        entity.check_save(self)?;
        let id = entity.id();
        E::table_mut(self).insert(entity);
        Ok(id)
    }

    fn delete<E: Entity>(&mut self, id: E::Id) -> Result<E> {
        if !E::table(self).contains(id) {
            return Err(EventHubError::not_found(E::KIND, id));
        }
        if E::has_links(self, id) {
            return Err(EventHubError::Conflict(format!(
                "{} {} is still linked and must be detached first",
                E::KIND, id
            )));
        }
        E::table_mut(self)
            .remove(id)
            .ok_or_else(|| EventHubError::not_found(E::KIND, id))
    }
}

impl Entity for User {
    type Id = UserId;

    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> UserId {
        self.id
    }

    fn table(store: &Store) -> &Table<Self> {
        &store.users
    }

    fn table_mut(store: &mut Store) -> &mut Table<Self> {
        &mut store.users
    }

    fn has_links(store: &Store, id: UserId) -> bool {
        !store.links.user_comments.right_of(id).is_empty()
            || !store.links.favorites.right_of(id).is_empty()
    }

    fn check_save(&self, store: &Store) -> Result<()> {
        let taken = store
            .users
            .values()
            .any(|other| other.id != self.id && other.username == self.username);
        if taken {
            return Err(EventHubError::Conflict(format!(
                "username '{}' is already taken",
                self.username
            )));
        }
        Ok(())
    }
}

impl Entity for Event {
    type Id = EventId;

    const KIND: EntityKind = EntityKind::Event;

    fn id(&self) -> EventId {
        self.id
    }

    fn table(store: &Store) -> &Table<Self> {
        &store.events
    }

    fn table_mut(store: &mut Store) -> &mut Table<Self> {
        &mut store.events
    }

    fn has_links(store: &Store, id: EventId) -> bool {
        !store.links.event_comments.right_of(id).is_empty()
            || !store.links.genre_events.left_of(id).is_empty()
            || !store.links.favorites.left_of(id).is_empty()
    }
}

impl Entity for Genre {
    type Id = GenreId;

    const KIND: EntityKind = EntityKind::Genre;

    fn id(&self) -> GenreId {
        self.id
    }

    fn table(store: &Store) -> &Table<Self> {
        &store.genres
    }

    fn table_mut(store: &mut Store) -> &mut Table<Self> {
        &mut store.genres
    }

    fn has_links(store: &Store, id: GenreId) -> bool {
        !store.links.genre_events.right_of(id).is_empty()
    }

    fn check_save(&self, store: &Store) -> Result<()> {
        let taken = store
            .genres
            .values()
            .any(|other| other.id != self.id && other.name == self.name);
        if taken {
            return Err(EventHubError::Conflict(format!(
                "genre '{}' already exists",
                self.name
            )));
        }
        Ok(())
    }
}

impl Entity for Comment {
    type Id = CommentId;

    const KIND: EntityKind = EntityKind::Comment;

    fn id(&self) -> CommentId {
        self.id()
    }

    fn table(store: &Store) -> &Table<Self> {
        &store.comments
    }

    fn table_mut(store: &mut Store) -> &mut Table<Self> {
        &mut store.comments
    }

    fn has_links(store: &Store, id: CommentId) -> bool {
        !store.links.user_comments.left_of(id).is_empty()
            || !store.links.event_comments.left_of(id).is_empty()
    }

    /// Only text may change; new comments come from the association manager
    fn check_save(&self, store: &Store) -> Result<()> {
        let existing = store.comments.get(self.id()).ok_or_else(|| {
            EventHubError::Conflict(format!(
                "comment {} must be attached before it can be saved",
                self.id()
            ))
        })?;
        if existing.user_id()? != self.user_id()? || existing.event_id()? != self.event_id()? {
            return Err(EventHubError::Conflict(format!(
                "comment {} cannot change its user or event",
                self.id()
            )));
        }
        Ok(())
    }
}

impl Entity for Favorite {
    type Id = FavoriteId;

    const KIND: EntityKind = EntityKind::Favorite;

    fn id(&self) -> FavoriteId {
        self.id
    }

    fn table(store: &Store) -> &Table<Self> {
        &store.favorites
    }

    fn table_mut(store: &mut Store) -> &mut Table<Self> {
        &mut store.favorites
    }

    fn has_links(store: &Store, id: FavoriteId) -> bool {
        store.links.favorites.contains(id.user_id, id.event_id)
    }

    fn check_save(&self, store: &Store) -> Result<()> {
        if !store.favorites.contains(self.id) {
            return Err(EventHubError::Conflict(format!(
                "favorite {} must be attached before it can be saved",
                self.id
            )));
        }
        Ok(())
    }
}
