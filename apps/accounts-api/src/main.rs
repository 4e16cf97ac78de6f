//! Accounts API - user registration and management over MongoDB

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
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
    install_color_eyre();

    // Optional; deployments usually set the environment directly
    let dotenv = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let state = AppState {
        config: config.clone(),
        mongo_client,
        db,
    };

    api::init_indexes(&state).await?;

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            drop(state.mongo_client);
            info!("MongoDB connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Accounts API shutdown complete");
    Ok(())
}
