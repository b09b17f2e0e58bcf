//! Estate Backend Service
//!
//! Main entry point for the real-estate marketing site backend.
//! This service provides:
//! - JSON REST API under `/api` (catalog, back office, accounts, contact form)
//! - Static serving of uploaded property images under `/uploads`

use estate_backend::api;
use estate_backend::database::{create_pool, run_migrations};
use estate_backend::deployment;
use estate_backend::{AppConfig, AppError, AppResult, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "estate_backend={},sqlx=warn,tower_http=info",
            config.log_level
        )
        .into()
    });

    if config.json_logs() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, shutting down gracefully...");
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    init_tracing(&config);

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║           Estate Backend Service Starting                 ║");
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("HTTP port: {}", config.http_port);
    if config.is_production() && config.cors_origins.is_empty() {
        warn!("CORS_ORIGINS is empty; cross-origin browser requests will be refused");
    }

    // =========================================================================
    // DATABASE SETUP
    // =========================================================================
    info!("Connecting to database...");

    let pool = create_pool(&config.database).await.map_err(|e| {
        error!("Failed to create database pool: {}", e);
        AppError::Database(e)
    })?;

    info!("Database connection pool created successfully");
    info!("Max connections: {}", config.database.max_connections);

    info!("Running database migrations...");
    run_migrations(&pool).await.map_err(|e| {
        error!("Database migration failed: {}", e);
        AppError::Database(e)
    })?;

    info!("Database migrations completed successfully");

    // =========================================================================
    // CORE SERVICES INITIALIZATION
    // =========================================================================
    info!("Initializing core services...");

    let http_port = config.http_port;
    let environment = config.environment.clone();
    let api_base = deployment::api_base_url(
        "localhost",
        http_port,
        config.public_api_url.as_deref(),
    );

    let app_state = Arc::new(AppState::new(pool, config));
    info!("✓ Application state initialized with repositories");

    app_state.uploads.ensure_dirs().await.map_err(|e| {
        error!("Could not prepare upload directory: {}", e);
        e
    })?;
    info!(
        "✓ Upload storage ready at {} (max {} bytes per file)",
        app_state.uploads.root().display(),
        app_state.uploads.max_bytes()
    );

    let app = api::router(app_state);
    info!("✓ HTTP router initialized");

    // =========================================================================
    // START SERVER
    // =========================================================================
    let addr = SocketAddr::from(([0, 0, 0, 0], http_port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Message(format!("Failed to bind HTTP server: {}", e)))?;

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║           Estate Backend Service Ready!                   ║");
    info!("╠══════════════════════════════════════════════════════════╣");
    info!("║  HTTP API:     {}                                  ║", addr);
    info!("║  Local API:    {}                  ║", api_base);
    info!("║  Environment:  {}                               ║", environment);
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("HTTP server error: {}", e);
            AppError::Io(e)
        })?;

    info!("Estate backend service shutdown complete");
    Ok(())
}
