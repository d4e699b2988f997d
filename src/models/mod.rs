//! Data models module
//!
//! This module contains all data structures used throughout the application.
//! Entities refer to each other by id only; relationship collections live in
//! the store's association indices.

pub mod user;
pub mod event;
pub mod genre;
pub mod comment;
pub mod favorite;

pub type UserId = i64;
pub type EventId = i64;
pub type GenreId = i64;
pub type CommentId = i64;
pub type ClubId = i64;

// Re-export commonly used models
pub use user::{User, Role, CreateUserRequest};
pub use event::{Event, CreateEventRequest};
pub use genre::Genre;
pub use comment::{Comment, CommentOrder};
pub use favorite::{Favorite, FavoriteId};
