//! Configuration for Accounts API

use core_config::{app_info, server::ServerConfig, env_parse_or, AppInfo, ConfigError, FromEnv};
use database::mongodb::MongoConfig;
use domain_users::{PasswordHasher, DEFAULT_COST};

pub use core_config::Environment;

/// Password hashing settings
///
/// - `BCRYPT_COST` (optional, default 12, accepted 4..=31)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    pub fn hasher(&self) -> PasswordHasher {
        PasswordHasher::new(self.bcrypt_cost)
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

impl FromEnv for PasswordConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let bcrypt_cost = env_parse_or("BCRYPT_COST", DEFAULT_COST)?;

        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::ParseError {
                key: "BCRYPT_COST".to_string(),
                details: format!("{} is outside the bcrypt range 4..=31", bcrypt_cost),
            });
        }

        Ok(Self { bcrypt_cost })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub password: PasswordConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();
        let environment = Environment::from_env();
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(app.name);
        }
        let server = ServerConfig::from_env()?;
        let password = PasswordConfig::from_env()?;

        Ok(Self {
            app,
            mongodb,
            server,
            password,
            environment,
        })
    }
}
