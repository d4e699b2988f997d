//! Store snapshots
//!
//! A snapshot is the whole store as plain lists plus the id sequences. It is
//! written as JSON. Restoring replays every comment, favorite and genre tag
//! through the association manager, so a snapshot that references a missing
//! row is rejected instead of loading one-sided links.

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::models::{Comment, Event, EventId, Favorite, Genre, GenreId, User};
use crate::utils::errors::{EventHubError, Result};
use super::store::{EntityStore, Store};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequences {
    pub users: i64,
    pub events: i64,
    pub genres: i64,
    pub comments: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub users: Vec<User>,
    pub events: Vec<Event>,
    pub genres: Vec<Genre>,
    /// Comments in id order, which is attach order
    pub comments: Vec<Comment>,
    /// Favorites in per-user insertion order
    pub favorites: Vec<Favorite>,
    /// Genre tags in tagging order
    pub genre_links: Vec<(GenreId, EventId)>,
    pub sequences: Sequences,
}

impl Snapshot {
    /// Capture the current store contents
    pub fn capture(store: &Store) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            users: store.users.values().cloned().collect(),
            events: store.events.values().cloned().collect(),
            genres: store.genres.values().cloned().collect(),
            comments: store.comments.values().cloned().collect(),
            favorites: store.list_favorites().into_iter().cloned().collect(),
            genre_links: store.links.genre_events.pairs().collect(),
            sequences: Sequences {
                users: store.users.last_id(),
                events: store.events.last_id(),
                genres: store.genres.last_id(),
                comments: store.comments.last_id(),
            },
        }
    }

    /// Rebuild a store from this snapshot
    pub fn restore(self) -> Result<Store> {
        if self.version != SNAPSHOT_VERSION {
            return Err(EventHubError::Snapshot(format!(
                "unsupported snapshot version {} (expected {})",
                self.version, SNAPSHOT_VERSION
            )));
        }

        let mut store = Store::new();
        for user in self.users {
            store.save(user).map_err(snapshot_error)?;
        }
        for event in self.events {
            store.save(event).map_err(snapshot_error)?;
        }
        for genre in self.genres {
            store.save(genre).map_err(snapshot_error)?;
        }

        let mut associations = store.associations();
        for comment in self.comments {
            associations.restore_comment(comment).map_err(snapshot_error)?;
        }
        for favorite in self.favorites {
            associations
                .attach_favorite(favorite.user_id(), favorite.event_id(), favorite.created_at)
                .map_err(snapshot_error)?;
        }
        for (genre_id, event_id) in self.genre_links {
            associations.attach_genre(genre_id, event_id).map_err(snapshot_error)?;
        }

        store.users.set_last_id(self.sequences.users);
        store.events.set_last_id(self.sequences.events);
        store.genres.set_last_id(self.sequences.genres);
        store.comments.set_last_id(self.sequences.comments);
        for id in store.users.values().map(|u| u.id).collect::<Vec<_>>() {
            store.users.set_last_id(id);
        }
        for id in store.events.values().map(|e| e.id).collect::<Vec<_>>() {
            store.events.set_last_id(id);
        }
        for id in store.genres.values().map(|g| g.id).collect::<Vec<_>>() {
            store.genres.set_last_id(id);
        }
        Ok(store)
    }
}

fn snapshot_error(err: EventHubError) -> EventHubError {
    EventHubError::Snapshot(err.to_string())
}

/// Write a snapshot of `store` to `path` as JSON
pub async fn save_snapshot(store: &Store, path: &Path) -> Result<()> {
    let snapshot = Snapshot::capture(store);
    let data = serde_json::to_vec_pretty(&snapshot)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, data).await?;
    info!(path = %path.display(), users = snapshot.users.len(), events = snapshot.events.len(), "Snapshot written");
    Ok(())
}

/// Load a store from a snapshot file; `None` when the file does not exist
pub async fn load_snapshot(path: &Path) -> Result<Option<Store>> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No snapshot found");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let snapshot: Snapshot = serde_json::from_slice(&data)?;
    let store = snapshot.restore()?;
    info!(path = %path.display(), stats = ?store.stats(), "Snapshot loaded");
    Ok(Some(store))
}
