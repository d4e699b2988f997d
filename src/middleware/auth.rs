//! Authentication middleware
//!
//! Turns an optional authenticated principal into the `Actor` every service
//! operation runs as.

use std::future::Future;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::models::User;
use crate::services::auth::Actor;
use crate::utils::errors::{EventHubError, Result};

/// An authenticated identity as delivered by the outer layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
}

impl Principal {
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into() }
    }
}

/// Looks up the stored user behind a principal
pub trait IdentityResolver: Send + Sync {
    /// Fails with `Unauthorized` when no user carries the name
    fn resolve(&self, username: &str) -> impl Future<Output = Result<User>> + Send;
}

/// Authentication middleware
#[derive(Clone)]
pub struct AuthMiddleware<R> {
    resolver: R,
}

impl<R: IdentityResolver> AuthMiddleware<R> {
    /// Create a new AuthMiddleware instance
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Resolve the actor for a request. No principal means anonymous.
    pub async fn actor_for(&self, principal: Option<&Principal>) -> Result<Actor> {
        let Some(principal) = principal else {
            debug!("No principal supplied, acting anonymously");
            return Ok(Actor::Anonymous);
        };

        match self.resolver.resolve(&principal.username).await {
            Ok(user) => {
                debug!(user_id = user.id, role = %user.role, "Principal resolved");
                Ok(Actor::User(user))
            }
            Err(EventHubError::NotFound { .. }) | Err(EventHubError::Unauthorized(_)) => {
                warn!(username = %principal.username, "Principal does not match a stored user");
                Err(EventHubError::Unauthorized(format!(
                    "unknown principal '{}'",
                    principal.username
                )))
            }
            Err(e) => Err(e),
        }
    }
}
