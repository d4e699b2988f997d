//! EventHub
//!
//! Main application entry point

use anyhow::Context;
use tracing::{info, warn};

use EventHub::{
    config::Settings,
    database::DatabaseService,
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", EventHub::info());

    // Open the store, restoring the snapshot when one exists
    let database = DatabaseService::open(&settings.storage).await?;
    database.health_check().await?;

    info!("Initializing services...");
    let services = ServiceFactory::new(database.clone(), settings.clone());

    if let Some(admin) = &settings.admin {
        let user = services.user_service.ensure_admin(admin).await?;
        info!(user_id = user.id, username = %user.username, "Admin account ready");
    }
    if services.user_service.admins().await.is_empty() {
        warn!("No admin account exists; genres and event acceptance are unavailable");
    }

    let stats = services.stats().await;
    info!(
        users = stats.users,
        events = stats.events,
        genres = stats.genres,
        comments = stats.comments,
        favorites = stats.favorites,
        "EventHub is ready"
    );

    tokio::signal::ctrl_c().await.context("failed to listen for shutdown signal")?;
    info!("Shutdown requested");

    if settings.storage.save_on_shutdown {
        if database.persist().await? {
            info!("Store persisted");
        }
    }

    info!("EventHub has been shut down.");
    Ok(())
}
