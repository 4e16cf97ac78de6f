//! Users API routes

use axum::Router;
use domain_users::{handlers, MongoUserRepository, UserService};

use crate::state::AppState;

/// Create users router
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(state.db.clone());
    let service = UserService::with_hasher(repository, state.config.password.hasher());
    handlers::router(service)
}

/// Ensure unique username/email indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoUserRepository::new(state.db.clone());
    repository.create_indexes().await?;
    Ok(())
}
