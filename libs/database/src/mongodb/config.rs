#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or, env_required};

/// Atlas cluster the accounts service has always used
pub const DEFAULT_CLUSTER_HOST: &str = "cluster0.mj7tdpn.mongodb.net";

/// Database the driver falls back to when the URI names none
pub const DEFAULT_DATABASE: &str = "test";

/// MongoDB connection settings.
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "accounts");
///
/// // Atlas SRV URI built from credentials
/// let config = MongoConfig::from_credentials("ana", "s3cret", DEFAULT_CLUSTER_HOST);
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string, `mongodb://` or `mongodb+srv://`
    pub url: String,

    /// Database holding the `users` collection
    pub database: String,

    /// Optional application name reported to the server
    pub app_name: Option<String>,

    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Config for `url` using the default database
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_database(url, DEFAULT_DATABASE)
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }

    /// Atlas SRV connection string from a user/password pair.
    ///
    /// Credentials are percent-encoded so passwords containing `@`, `:` or `/`
    /// survive URI parsing.
    #[cfg(feature = "config")]
    pub fn from_credentials(user: &str, password: &str, host: &str) -> Self {
        let url = format!(
            "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
            urlencoding::encode(user),
            urlencoding::encode(password),
            host
        );
        Self::new(url)
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// The connection string with any password replaced, safe for logs
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((userinfo, host)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };
        let user = userinfo.split(':').next().unwrap_or_default();
        format!("{scheme}://{user}:****@{host}")
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new("mongodb://localhost:27017")
    }
}

/// Load MongoConfig from environment variables
///
/// - `MONGODB_URL` (optional) - full connection string; when set the credential
///   variables below are ignored
/// - `DB_USER`, `DB_PASS` (required without `MONGODB_URL`) - Atlas credentials
/// - `DB_HOST` (optional, default: the service's Atlas cluster)
/// - `MONGODB_DATABASE` (optional, default: `test`)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` / `MONGODB_MIN_POOL_SIZE` (optional, 100 / 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` / `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, 10 / 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var("MONGODB_URL") {
            Ok(url) => Self::new(url),
            Err(_) => {
                let user = env_required("DB_USER")?;
                let password = env_required("DB_PASS")?;
                let host = env_or_default("DB_HOST", DEFAULT_CLUSTER_HOST);
                Self::from_credentials(&user, &password, &host)
            }
        };

        Ok(Self {
            database: env_or_default("MONGODB_DATABASE", DEFAULT_DATABASE),
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", base.max_pool_size)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", base.min_pool_size)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                base.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                base.server_selection_timeout_secs,
            )?,
            ..base
        })
    }
}
