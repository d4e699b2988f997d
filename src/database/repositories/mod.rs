//! Database repositories module
//!
//! Read-side queries over the `Store`, grouped by entity. Each repository is
//! an `impl Store` block so queries run under whatever guard the caller
//! already holds.

pub mod user;
pub mod event;
pub mod genre;
pub mod comment;
pub mod favorite;
