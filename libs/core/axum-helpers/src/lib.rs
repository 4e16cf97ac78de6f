//! # Axum Helpers
//!
//! Shared plumbing for the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`server`]**: Router setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: `{ "msg": ... }` error responses
//! - **[`extractors`]**: Request extractors (lenient JSON bodies)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! let router = create_router::<ApiDoc>(Router::new())?;
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

// Re-export HTTP middleware
pub use http::{cors_layer_from_env, security_headers};

// Re-export error types
pub use errors::{AppError, MessageResponse};

// Re-export extractors
pub use extractors::JsonBody;
