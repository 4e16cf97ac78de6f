use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Build a client from `config` and verify the server answers a `ping`.
///
/// The driver connects lazily, so without the ping a wrong password or an
/// unreachable cluster would only surface on the first request.
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Attempting to connect to MongoDB at {}", config.redacted_url());

    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// [`connect_from_config`] with exponential backoff.
///
/// `None` uses [`RetryConfig::default`] (3 retries starting at 100ms). The
/// error from the final attempt is returned when all of them fail.
///
/// ```ignore
/// let config = MongoConfig::from_env()?;
/// let client = connect_from_config_with_retry(&config, Some(RetryConfig::new().with_max_retries(5))).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    match retry_config {
        Some(policy) => retry_with_backoff(|| connect_from_config(config), policy).await,
        None => retry(|| connect_from_config(config)).await,
    }
}
