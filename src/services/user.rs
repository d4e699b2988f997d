//! User service implementation
//!
//! This service handles account registration, credential checks, account
//! deletion and the bootstrap admin account.

use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::config::{AdminConfig, Settings};
use crate::database::{DatabaseService, EntityStore};
use crate::middleware::auth::{IdentityResolver, Principal};
use crate::models::{CreateUserRequest, Role, User, UserId};
use crate::services::auth::{Actor, AuthService, Operation};
use crate::utils::clock::Clock;
use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers::{is_blank, is_valid_email, is_valid_phone};
use crate::utils::logging::{log_admin_action, log_user_action};
use crate::utils::password::PasswordEncoder;

/// User service for managing user operations
#[derive(Clone)]
pub struct UserService {
    database: DatabaseService,
    auth: AuthService,
    encoder: Arc<dyn PasswordEncoder>,
    clock: Arc<dyn Clock>,
    settings: Settings,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(
        database: DatabaseService,
        auth: AuthService,
        encoder: Arc<dyn PasswordEncoder>,
        clock: Arc<dyn Clock>,
        settings: Settings,
    ) -> Self {
        Self {
            database,
            auth,
            encoder,
            clock,
            settings,
        }
    }

    /// Register a new account.
    ///
    /// Anonymous callers may create USER accounts only; admins may create
    /// accounts with any role.
    pub async fn register(&self, actor: &Actor, request: CreateUserRequest) -> Result<User> {
        let role = request.role.unwrap_or_default();
        self.auth.authorize(actor, Operation::register(role), None)?;
        debug!(username = %request.username, role = %role, "Registering user");

        self.validate_request(&request)?;
        let password = self.encoder.encode(&request.password)?;

        let user = self.insert_user(request, password, role).await?;
        log_user_action(user.id, "registered", Some(&role.to_string()));
        if let Some(admin_id) = actor.user_id() {
            log_admin_action(admin_id, "register_user", Some(&user.username), Some(&role.to_string()));
        }
        Ok(user)
    }

    /// Check credentials and return the principal to act as
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Principal> {
        debug!(username = %username, "Authenticating user");
        let encoded = {
            let store = self.database.read().await;
            store.find_user_by_username(username).map(|user| user.password.clone())
        };

        let Some(encoded) = encoded else {
            warn!(username = %username, "Authentication failed: unknown username");
            return Err(EventHubError::Unauthorized("bad credentials".to_string()));
        };
        if !self.encoder.matches(password, &encoded)? {
            warn!(username = %username, "Authentication failed: wrong password");
            return Err(EventHubError::Unauthorized("bad credentials".to_string()));
        }

        Ok(Principal::new(username))
    }

    /// The stored record of the acting user
    pub async fn current(&self, actor: &Actor) -> Result<User> {
        let user_id = actor.require_user()?.id;
        let store = self.database.read().await;
        store.require::<User>(user_id).cloned()
    }

    pub async fn find(&self, user_id: UserId) -> Option<User> {
        self.database.read().await.find_by_id::<User>(user_id).cloned()
    }

    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        self.database.read().await.find_user_by_username(username).cloned()
    }

    pub async fn list(&self) -> Vec<User> {
        self.database.read().await.list_users().into_iter().cloned().collect()
    }

    pub async fn admins(&self) -> Vec<User> {
        self.database.read().await.users_with_role(Role::Admin).into_iter().cloned().collect()
    }

    /// Delete the acting user's own account with its comments and favorites
    pub async fn delete_account(&self, actor: &Actor) -> Result<User> {
        self.auth.authorize(actor, Operation::DeleteOwnAccount, actor.user_id())?;
        let user_id = actor.require_user()?.id;
        debug!(user_id = user_id, "Deleting account");

        let mut store = self.database.write().await;
        store.require::<User>(user_id)?;
        let report = store.associations().sever_user(user_id)?;
        let user = store.delete::<User>(user_id)?;

        log_user_action(
            user_id,
            "deleted",
            Some(&format!(
                "{} comments, {} favorites removed",
                report.comments.len(),
                report.favorites.len()
            )),
        );
        Ok(user)
    }

    /// Create the configured admin account unless the username already exists
    pub async fn ensure_admin(&self, config: &AdminConfig) -> Result<User> {
        if let Some(existing) = self.find_by_username(&config.username).await {
            if !existing.is_admin() {
                warn!(user_id = existing.id, username = %existing.username, "Configured admin username belongs to a non-admin account");
            }
            return Ok(existing);
        }

        let request = CreateUserRequest {
            username: config.username.clone(),
            email: config.email.clone(),
            phone_number: config.phone_number.clone(),
            password: config.password.clone(),
            role: Some(Role::Admin),
        };
        self.validate_request(&request)?;
        let password = self.encoder.encode(&request.password)?;
        let user = self.insert_user(request, password, Role::Admin).await?;

        info!(user_id = user.id, username = %user.username, "Bootstrap admin account created");
        Ok(user)
    }

    async fn insert_user(&self, request: CreateUserRequest, password: String, role: Role) -> Result<User> {
        let mut store = self.database.write().await;
        if store.find_user_by_username(&request.username).is_some() {
            return Err(EventHubError::Conflict(format!(
                "username '{}' is already taken",
                request.username
            )));
        }

        let user = User {
            id: store.next_id::<User>(),
            username: request.username,
            email: request.email,
            phone_number: request.phone_number,
            password,
            role,
            created_at: self.clock.now(),
        };
        store.save(user.clone())?;
        Ok(user)
    }

    fn validate_request(&self, request: &CreateUserRequest) -> Result<()> {
        if is_blank(&request.username) {
            return Err(EventHubError::invalid("username", "username must not be empty"));
        }
        if request.username.chars().any(char::is_whitespace) {
            return Err(EventHubError::invalid("username", "username must not contain whitespace"));
        }
        if !is_valid_email(&request.email) {
            return Err(EventHubError::invalid("email", format!("'{}' is not a valid email address", request.email)));
        }
        if !is_valid_phone(&request.phone_number) {
            return Err(EventHubError::invalid(
                "phone_number",
                format!("'{}' is not a valid phone number", request.phone_number),
            ));
        }
        let min_length = self.settings.security.min_password_length;
        if request.password.chars().count() < min_length {
            return Err(EventHubError::invalid(
                "password",
                format!("password must be at least {} characters", min_length),
            ));
        }
        Ok(())
    }
}

impl IdentityResolver for UserService {
    fn resolve(&self, username: &str) -> impl Future<Output = Result<User>> + Send {
        async move {
            let store = self.database.read().await;
            store
                .find_user_by_username(username)
                .cloned()
                .ok_or_else(|| EventHubError::Unauthorized(format!("unknown principal '{}'", username)))
        }
    }
}
