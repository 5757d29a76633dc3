//! Configuration management for the server.

use std::env;

/// Upstream product API used when `CATALOG_API_URL` is unset.
pub const DEFAULT_CATALOG_API_URL: &str = "https://api.escuelajs.co/api/v1";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection URL; slots are kept in memory when unset
    pub database_url: Option<String>,
    /// Base URL of the remote product API
    pub catalog_api_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let catalog_api_url = env::var("CATALOG_API_URL")
            .unwrap_or_else(|_| DEFAULT_CATALOG_API_URL.to_string());
        if !catalog_api_url.starts_with("http") {
            return Err(ConfigError::InvalidCatalogUrl(catalog_api_url));
        }

        Ok(Self {
            host,
            port,
            database_url,
            catalog_api_url: catalog_api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Whether slots are persisted to PostgreSQL.
    pub fn uses_database(&self) -> bool {
        self.database_url.is_some()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("CATALOG_API_URL must be an http(s) URL, got {0:?}")]
    InvalidCatalogUrl(String),
}
