//! Test context for unified test setup
//!
//! Wires every service over one in-memory store with a manual clock and a
//! cheap password encoder, and offers shortcuts for seeding users, events
//! and genres.

use std::sync::{Arc, Once};
use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

use EventHub::config::{AdminConfig, Settings};
use EventHub::database::{DatabaseService, StoreStats};
use EventHub::models::{CreateEventRequest, Event, Genre, Role, User};
use EventHub::services::{Actor, ServiceFactory};
use EventHub::utils::{ManualClock, Pbkdf2PasswordEncoder};

use super::test_data::{user_request, TEST_PASSWORD};

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub services: ServiceFactory,
    pub database: DatabaseService,
    pub clock: Arc<ManualClock>,
    pub settings: Settings,
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Create a new test context over an empty store
    pub fn new() -> Self {
        init_test_logging();
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let settings = Self::create_test_settings(&temp_dir);
        Self::with_settings(settings, DatabaseService::in_memory(), temp_dir)
    }

    /// Create a test context over an existing database
    pub fn with_settings(settings: Settings, database: DatabaseService, temp_dir: TempDir) -> Self {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap()));
        let services = ServiceFactory::with_parts(
            database.clone(),
            settings.clone(),
            clock.clone(),
            Arc::new(Pbkdf2PasswordEncoder::new(settings.security.password_iterations)),
        );

        Self {
            services,
            database,
            clock,
            settings,
            temp_dir,
        }
    }

    /// Settings with a snapshot path inside the temp dir and fast hashing
    pub fn create_test_settings(temp_dir: &TempDir) -> Settings {
        let mut settings = Settings::default();
        settings.storage.snapshot_path = Some(
            temp_dir.path().join("eventhub.json").to_string_lossy().into_owned(),
        );
        settings.security.password_iterations = 10;
        settings.comments.max_length = 200;
        settings.logging.directory = temp_dir.path().join("logs").to_string_lossy().into_owned();
        settings
    }

    /// Register a USER account anonymously and act as it
    pub async fn create_user(&self, username: &str) -> Actor {
        let user = self
            .services
            .user_service
            .register(&Actor::Anonymous, user_request(username))
            .await
            .expect("Failed to register user");
        Actor::User(user)
    }

    /// The bootstrap admin, created on first use
    pub async fn admin(&self) -> Actor {
        let config = AdminConfig {
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            phone_number: "+420 777 000 111".to_string(),
            password: TEST_PASSWORD.to_string(),
        };
        let user = self
            .services
            .user_service
            .ensure_admin(&config)
            .await
            .expect("Failed to create admin");
        assert_eq!(user.role, Role::Admin);
        Actor::User(user)
    }

    /// Store an event a week from the current test time
    pub async fn create_event(&self, title: &str) -> Event {
        self.services
            .event_service
            .save(CreateEventRequest {
                title: title.to_string(),
                event_date: self.now() + Duration::days(7),
                club_id: None,
                finished: false,
            })
            .await
            .expect("Failed to save event")
    }

    pub async fn create_genre(&self, name: &str) -> Genre {
        let admin = self.admin().await;
        self.services
            .genre_service
            .create(&admin, name)
            .await
            .expect("Failed to create genre")
    }

    /// Re-read a user so an actor reflects the stored record
    pub async fn reload(&self, actor: &Actor) -> Option<User> {
        let user_id = actor.user_id()?;
        self.services.user_service.find(user_id).await
    }

    pub fn now(&self) -> chrono::DateTime<Utc> {
        use EventHub::utils::Clock;
        self.clock.now()
    }

    pub fn advance_seconds(&self, seconds: i64) {
        self.clock.advance(Duration::seconds(seconds));
    }

    pub async fn stats(&self) -> StoreStats {
        self.services.stats().await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
