//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod comment;
pub mod event;
pub mod favorite;
pub mod genre;
pub mod user;

// Re-export commonly used services
pub use auth::{Actor, AuthService, Decision, Operation, Ownership};
pub use comment::CommentService;
pub use event::EventService;
pub use favorite::FavoriteService;
pub use genre::GenreService;
pub use user::UserService;

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::database::{DatabaseService, StoreStats};
use crate::middleware::auth::AuthMiddleware;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::password::{PasswordEncoder, Pbkdf2PasswordEncoder};

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub auth_service: AuthService,
    pub comment_service: CommentService,
    pub favorite_service: FavoriteService,
    pub genre_service: GenreService,
    pub event_service: EventService,
    database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with the wall clock and PBKDF2 passwords
    pub fn new(database: DatabaseService, settings: Settings) -> Self {
        let encoder = Arc::new(Pbkdf2PasswordEncoder::new(settings.security.password_iterations));
        Self::with_parts(database, settings, Arc::new(SystemClock), encoder)
    }

    /// Create a ServiceFactory with an explicit clock and password encoder
    pub fn with_parts(
        database: DatabaseService,
        settings: Settings,
        clock: Arc<dyn Clock>,
        encoder: Arc<dyn PasswordEncoder>,
    ) -> Self {
        let auth_service = AuthService::new();
        let user_service = UserService::new(
            database.clone(),
            auth_service.clone(),
            encoder,
            clock.clone(),
            settings.clone(),
        );
        let comment_service = CommentService::new(database.clone(), auth_service.clone(), clock.clone(), settings);
        let favorite_service = FavoriteService::new(database.clone(), auth_service.clone(), clock.clone());
        let genre_service = GenreService::new(database.clone(), auth_service.clone());
        let event_service = EventService::new(database.clone(), auth_service.clone(), clock);

        Self {
            user_service,
            auth_service,
            comment_service,
            favorite_service,
            genre_service,
            event_service,
            database,
        }
    }

    /// Get authentication middleware backed by the user store
    pub fn auth_middleware(&self) -> AuthMiddleware<UserService> {
        AuthMiddleware::new(self.user_service.clone())
    }

    pub fn database(&self) -> &DatabaseService {
        &self.database
    }

    /// Row and link counts of the shared store
    pub async fn stats(&self) -> StoreStats {
        self.database.stats().await
    }
}
