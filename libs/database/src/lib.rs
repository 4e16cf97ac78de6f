//! Database connectors for the accounts workspace.
//!
//! # Features
//!
//! - `config` - Load [`mongodb::MongoConfig`] from the environment via `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "test");
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let users = client.database(config.database()).collection::<Document>("users");
//! ```

pub mod common;
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
