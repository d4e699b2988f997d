//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers::{is_valid_email, is_valid_phone};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_storage_config(&settings.storage)?;
    validate_security_config(&settings.security)?;
    validate_comments_config(&settings.comments)?;
    validate_logging_config(&settings.logging)?;

    if let Some(ref admin_config) = settings.admin {
        validate_admin_config(admin_config, &settings.security)?;
    }

    Ok(())
}

/// Validate storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if let Some(path) = &config.snapshot_path {
        if path.trim().is_empty() {
            return Err(EventHubError::Config(
                "Snapshot path must not be empty when set".to_string()
            ));
        }
    } else if config.save_on_shutdown {
        return Err(EventHubError::Config(
            "save_on_shutdown requires a snapshot path".to_string()
        ));
    }

    Ok(())
}

/// Validate security configuration
fn validate_security_config(config: &super::SecurityConfig) -> Result<()> {
    if config.password_iterations == 0 {
        return Err(EventHubError::Config(
            "Password iterations must be greater than 0".to_string()
        ));
    }

    if config.min_password_length == 0 {
        return Err(EventHubError::Config(
            "Minimum password length must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate comment limits
fn validate_comments_config(config: &super::CommentsConfig) -> Result<()> {
    if config.max_length == 0 {
        return Err(EventHubError::Config(
            "Comment max length must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate bootstrap admin configuration
fn validate_admin_config(config: &super::AdminConfig, security: &super::SecurityConfig) -> Result<()> {
    if config.username.trim().is_empty() {
        return Err(EventHubError::Config(
            "Admin username is required".to_string()
        ));
    }

    if !is_valid_email(&config.email) {
        return Err(EventHubError::Config(
            format!("Admin email is invalid: {}", config.email)
        ));
    }

    if !is_valid_phone(&config.phone_number) {
        return Err(EventHubError::Config(
            format!("Admin phone number is invalid: {}", config.phone_number)
        ));
    }

    if config.password.chars().count() < security.min_password_length {
        return Err(EventHubError::Config(
            "Admin password is shorter than the minimum password length".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventHubError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventHubError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.file_name.is_empty() {
        return Err(EventHubError::Config(
            "Log file name is required".to_string()
        ));
    }

    Ok(())
}
