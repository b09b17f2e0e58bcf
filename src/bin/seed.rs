//! Populate the database with demo fixtures.
//!
//! Safe to run repeatedly; every fixture is upserted on its natural key.

use anyhow::Context;
use estate_backend::database::{create_pool, run_migrations};
use estate_backend::seed::{self, AdminCredentials};
use estate_backend::{AppConfig, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()
        .map_err(anyhow::Error::msg)
        .context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("estate_backend={},sqlx=warn", config.log_level).into()),
        )
        .init();

    info!("Connecting to database...");
    let pool = create_pool(&config.database)
        .await
        .context("failed to connect to the database")?;

    info!("Running database migrations...");
    run_migrations(&pool)
        .await
        .context("database migration failed")?;

    let admin = AdminCredentials::from_env();
    let state = AppState::new(pool, config);

    info!("Seeding fixtures...");
    let summary = seed::run(&state, &admin)
        .await
        .context("seeding failed")?;

    info!(
        categories = summary.categories,
        amenities = summary.amenities,
        features = summary.features,
        users = summary.users,
        properties_created = summary.properties_created,
        properties_updated = summary.properties_updated,
        images_added = summary.images_added,
        content_blocks = summary.content_blocks,
        "Seed complete"
    );
    info!("Admin login: {}", admin.email);

    Ok(())
}
