//! Error handling for EventHub
//!
//! This module defines the main error type used throughout the application.
//! Every core operation reports failures through it; the caller decides how
//! to map each kind onto its transport.

use std::fmt;
use thiserror::Error;

/// Kinds of stored entities, used to qualify lookup failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Event,
    Genre,
    Comment,
    Favorite,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "User"),
            EntityKind::Event => write!(f, "Event"),
            EntityKind::Genre => write!(f, "Genre"),
            EntityKind::Comment => write!(f, "Comment"),
            EntityKind::Favorite => write!(f, "Favorite"),
        }
    }
}

/// Main error type for EventHub
#[derive(Error, Debug)]
pub enum EventHubError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("Operation '{operation}' forbidden: {reason}")]
    Forbidden { operation: String, reason: String },

    #[error("Authentication required: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("Comment {comment_id} is detached from its {side}")]
    Detached { comment_id: i64, side: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for EventHub operations
pub type Result<T> = std::result::Result<T, EventHubError>;

impl EventHubError {
    /// Lookup failure for an entity addressed by a displayable id
    pub fn not_found(entity: EntityKind, id: impl fmt::Display) -> Self {
        EventHubError::NotFound { entity, id: id.to_string() }
    }

    pub fn forbidden(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        EventHubError::Forbidden {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EventHubError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Stable short code for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            EventHubError::NotFound { .. } => "not_found",
            EventHubError::Forbidden { .. } => "forbidden",
            EventHubError::Unauthorized(_) => "unauthorized",
            EventHubError::Conflict(_) => "conflict",
            EventHubError::Invalid { .. } => "invalid",
            EventHubError::Detached { .. } => "detached",
            EventHubError::Config(_) => "config",
            EventHubError::Snapshot(_) => "snapshot",
            EventHubError::PasswordHash(_) => "password_hash",
            EventHubError::Serialization(_) => "serialization",
            EventHubError::Io(_) => "io",
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventHubError::NotFound { .. } => false,
            EventHubError::Forbidden { .. } => false,
            EventHubError::Unauthorized(_) => true,
            EventHubError::Conflict(_) => false,
            EventHubError::Invalid { .. } => false,
            EventHubError::Detached { .. } => false,
            EventHubError::Config(_) => false,
            EventHubError::Snapshot(_) => false,
            EventHubError::PasswordHash(_) => false,
            EventHubError::Serialization(_) => false,
            EventHubError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventHubError::Config(_) => ErrorSeverity::Critical,
            EventHubError::Snapshot(_) => ErrorSeverity::Critical,
            EventHubError::Detached { .. } => ErrorSeverity::Error,
            EventHubError::Forbidden { .. } => ErrorSeverity::Warning,
            EventHubError::Unauthorized(_) => ErrorSeverity::Warning,
            EventHubError::NotFound { .. } => ErrorSeverity::Info,
            EventHubError::Conflict(_) => ErrorSeverity::Info,
            EventHubError::Invalid { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
