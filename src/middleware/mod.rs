//! Middleware module
//!
//! This module contains middleware that runs before the services

pub mod auth;

// Re-export commonly used middleware
pub use auth::{AuthMiddleware, IdentityResolver, Principal};
