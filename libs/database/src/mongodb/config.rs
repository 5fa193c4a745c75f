use core_config::{env_or_default, env_parse_or_default, env_required, ConfigError, FromEnv};

/// MongoDB database configuration
///
/// Can be constructed manually or loaded from environment variables.
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// MongoDB connection URL (required)
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a new MongoConfig with a URL and database name
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

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }
}

impl FromEnv for MongoConfig {
    /// Reads from environment variables:
    /// - MONGODB_URL: required
    /// - MONGODB_DATABASE: defaults to "user_registry"
    /// - MONGODB_MAX_POOL_SIZE / MONGODB_MIN_POOL_SIZE: defaults 100 / 5
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("MONGODB_URL")?,
            database: env_or_default("MONGODB_DATABASE", "user_registry"),
            app_name: None,
            max_pool_size: env_parse_or_default("MONGODB_MAX_POOL_SIZE", 100)?,
            min_pool_size: env_parse_or_default("MONGODB_MIN_POOL_SIZE", 5)?,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_from_env_success() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("testdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://localhost:27017");
                assert_eq!(config.database, "testdb");
                assert_eq!(config.max_pool_size, 100);
            },
        );
    }

    #[test]
    fn test_mongo_config_from_env_missing_url() {
        temp_env::with_var_unset("MONGODB_URL", || {
            let result = MongoConfig::from_env();
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("MONGODB_URL"));
        });
    }

    #[test]
    fn test_mongo_config_database_default() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", None),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.database, "user_registry");
            },
        );
    }

    #[test]
    fn test_mongo_config_with_database() {
        let config = MongoConfig::with_database("mongodb://prod-host:27017", "registry")
            .with_app_name("registry_api");
        assert_eq!(config.url, "mongodb://prod-host:27017");
        assert_eq!(config.database, "registry");
        assert_eq!(config.app_name.as_deref(), Some("registry_api"));
    }
}
