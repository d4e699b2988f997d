//! EventHub
//!
//! Core of an event management backend: users, events, genres, comments and
//! favorites, with the bidirectional links between them kept consistent and
//! every mutation gated by a role and ownership based authorization policy.

#![allow(non_snake_case)]

pub mod config;
pub mod services;
pub mod models;
pub mod database;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventHubError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::{Actor, ServiceFactory};
pub use middleware::{AuthMiddleware, Principal};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
