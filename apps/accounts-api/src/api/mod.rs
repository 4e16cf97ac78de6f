//! API routes module

pub mod health;
pub mod users;

use axum::{routing::get, Router};

use crate::state::AppState;

async fn root() -> &'static str {
    "Principal Route"
}

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(users::router(state))
        .merge(health::router(state.clone()))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    users::init_indexes(state).await
}
