use axum_helpers::server::create_production_app;
use axum_helpers::{track_usage, RateUsageTracker};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::MongoUserRepository;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    // Connect to MongoDB with startup retry
    let client = database::mongodb::connect_from_config_with_retry(&config.mongo, None)
        .await
        .map_err(|e| eyre::eyre!("MongoDB connection failed: {}", e))?;
    let db = client.database(&config.mongo.database);

    // Unique indexes on email/username back the duplicate checks
    MongoUserRepository::new(&db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;

    let state = AppState {
        config: config.clone(),
        client,
        db,
    };

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Per-client request accounting applies to every route
    let tracker = RateUsageTracker::new(config.rate_limit.window(), config.rate_limit.max_requests);

    // Merge the readiness endpoint and install the accounting middleware
    let app = router
        .merge(api::ready_router(state.clone()))
        .layer(axum::middleware::from_fn_with_state(tracker, track_usage));

    info!("Starting registry API with production-ready shutdown (30s timeout)");

    // Production-ready server with graceful shutdown and cleanup
    // State moves here for cleanup
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30), // 30s graceful shutdown timeout
        async move {
            info!("Shutting down: closing MongoDB connections");
            // MongoDB client closes automatically on drop
            drop(state.client);
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Registry API shutdown complete");
    Ok(())
}
