//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    pub comments: CommentsConfig,
    pub admin: Option<AdminConfig>,
    pub logging: LoggingConfig,
}

/// Store persistence configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// JSON snapshot file; `None` keeps the store in memory only
    pub snapshot_path: Option<String>,
    pub save_on_shutdown: bool,
}

/// Password policy and hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityConfig {
    pub password_iterations: u32,
    pub min_password_length: usize,
}

/// Comment limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommentsConfig {
    pub max_length: usize,
}

/// Admin account created at startup when missing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_name: String,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load settings from a named configuration file (extension optional)
    /// layered over the defaults, then `EVENTHUB__*` environment variables
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;
        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix("EVENTHUB").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EventHubError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                snapshot_path: None,
                save_on_shutdown: false,
            },
            security: SecurityConfig {
                password_iterations: 100_000,
                min_password_length: 8,
            },
            comments: CommentsConfig { max_length: 2000 },
            admin: None,
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: "logs".to_string(),
                file_name: "eventhub.log".to_string(),
                json: false,
            },
        }
    }
}
