//! Application configuration loaded from environment variables.
//!
//! Secrets (the Bomber integration key and the trigger token) are read
//! once at startup and held in memory for the life of the process.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Bomber integration API
    pub bomber_api_url: String,
    /// Bearer key for the Bomber integration API
    pub bomber_api_key: String,
    /// Shared secret presented by the scheduler on trigger calls
    pub sync_trigger_token: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            bomber_api_url: env::var("BOMBER_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("BOMBER_API_URL"))?,
            bomber_api_key: env::var("BOMBER_INTEGRATION_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("BOMBER_INTEGRATION_API_KEY"))?,
            sync_trigger_token: env::var("SYNC_TRIGGER_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SYNC_TRIGGER_TOKEN"))?,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Default config for tests only.
    ///
    /// The Bomber URL points at a discard port so any accidental fetch
    /// fails fast instead of hitting the network.
    pub fn test_default() -> Self {
        Self {
            bomber_api_url: "http://127.0.0.1:9".to_string(),
            bomber_api_key: "test_integration_key".to_string(),
            sync_trigger_token: "test_trigger_token".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
