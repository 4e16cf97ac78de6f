//! MongoDB connector and utilities

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_CLUSTER_HOST, DEFAULT_DATABASE, MongoConfig};
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use health::{HealthStatus, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
