//! API configuration

use std::time::Duration;

use infra_db::DatabaseConfig;
use serde::Deserialize;

/// API configuration
///
/// Every field has a default, so any subset can be set through `API_`
/// prefixed environment variables (`API_PORT=9000`, `API_JWT_SECRET=...`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// Database URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub database_max_connections: u32,
    /// Seconds a request waits for a pooled connection
    pub database_acquire_timeout_secs: u64,
    /// Apply bundled migrations at startup
    pub run_migrations: bool,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            database_url: infra_db::DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: 10,
            database_acquire_timeout_secs: 10,
            run_migrations: true,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings for `infra_db::create_pool`
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone())
            .max_connections(self.database_max_connections)
            .acquire_timeout(Duration::from_secs(self.database_acquire_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.database_url, "postgres://localhost/event_city");
        assert!(config.run_migrations);
    }

    #[test]
    fn test_database_config() {
        let config = ApiConfig {
            database_max_connections: 3,
            database_acquire_timeout_secs: 2,
            ..ApiConfig::default()
        };

        let pool = config.database_config();
        assert_eq!(pool.url, config.database_url);
        assert_eq!(pool.max_connections, 3);
        assert_eq!(pool.acquire_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: ApiConfig = config::Config::builder()
            .set_override("port", 9100)
            .and_then(|b| b.set_override("log_level", "debug"))
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.database_acquire_timeout_secs, 10);
    }
}
