//! Queue configuration support.
//!
//! Configuration for the remote trigger service can come from environment
//! variables or from a TOML file. Environment reading lives here, at the
//! boundary, so the queue itself only ever sees an explicit [`QueueConfig`].

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{ApiError, ApiResult};

/// Environment variable naming the Kowalski host.
pub const HOST_ENV: &str = "KOWALSKI_HOST";
/// Environment variable holding the Kowalski API token.
pub const TOKEN_ENV: &str = "KOWALSKI_API_TOKEN";

/// Connection settings for the remote trigger service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    pub host: String,
    pub api_token: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_protocol")]
    pub protocol: String,
}

fn default_port() -> u16 {
    443
}

fn default_protocol() -> String {
    "https".to_string()
}

impl QueueConfig {
    /// Read the configuration from the environment.
    ///
    /// `KOWALSKI_HOST` defaults to `localhost`; `KOWALSKI_API_TOKEN` is
    /// required. Port and protocol are fixed to 443/https.
    pub fn from_env() -> ApiResult<Self> {
        let host = env::var(HOST_ENV).unwrap_or_else(|_| "localhost".to_string());
        let api_token = env::var(TOKEN_ENV).map_err(|_| {
            ApiError::Config(format!(
                "No Kowalski API token found. Set the environment variable with \
                 export {TOKEN_ENV}=api_token"
            ))
        })?;

        Ok(Self {
            host,
            api_token,
            port: default_port(),
            protocol: default_protocol(),
        })
    }

    /// Load the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ApiResult<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ApiError::Config(format!("Failed to read config file: {}", e)))?;

        let config: QueueConfig = toml::from_str(&content)
            .map_err(|e| ApiError::Config(format!("Failed to parse config file: {}", e)))?;

        if config.api_token.is_empty() {
            return Err(ApiError::Config(
                "Config file requires a non-empty 'api_token' setting".to_string(),
            ));
        }

        Ok(config)
    }

    /// Base URL of the remote service.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}
