use core_config::{rate_limit::RateLimitConfig, server::ServerConfig, FromEnv};
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration.
/// Composes shared config components from the `core_config` and `database`
/// libraries.
#[derive(Clone, Debug)]
pub struct Config {
    pub mongo: MongoConfig,
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongo = MongoConfig::from_env()?; // Required - will fail if MONGODB_URL is not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let rate_limit = RateLimitConfig::from_env()?; // Defaults: 10000 requests per 5 minutes

        Ok(Self {
            mongo,
            server,
            rate_limit,
            environment,
        })
    }
}
