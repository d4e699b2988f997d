//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the EventHub application.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{EventHubError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer when dropped and must be kept
/// alive for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| EventHubError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let file_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| EventHubError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user account actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log comment lifecycle actions
pub fn log_comment_action(comment_id: i64, event_id: i64, action: &str, user_id: i64) {
    info!(
        comment_id = comment_id,
        event_id = event_id,
        action = action,
        user_id = user_id,
        "Comment action performed"
    );
}

/// Log favorite ledger changes
pub fn log_favorite_action(user_id: i64, event_id: i64, action: &str) {
    info!(
        user_id = user_id,
        event_id = event_id,
        action = action,
        "Favorite action performed"
    );
}

/// Log genre changes, including how many events a change touched
pub fn log_genre_action(genre_id: i64, action: &str, affected_events: usize) {
    info!(
        genre_id = genre_id,
        action = action,
        affected_events = affected_events,
        "Genre action performed"
    );
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log a denied authorization decision
pub fn log_policy_denial(user_id: Option<i64>, operation: &str, reason: &str) {
    if user_id.is_some() {
        warn!(
            user_id = user_id,
            operation = operation,
            reason = reason,
            "Operation denied by policy"
        );
    } else {
        debug!(
            operation = operation,
            reason = reason,
            "Anonymous operation denied"
        );
    }
}
