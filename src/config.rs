//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is loaded first if present.

use crate::models::Credentials;
use std::env;
use std::time::Duration;

/// Default HCGateway API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.hcgateway.shuchir.dev/api/v2";

/// Default per-call timeout for HCGateway requests (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    /// HCGateway API base URL (no trailing slash needed)
    pub hcgateway_base_url: String,
    /// Default HCGateway username, if configured
    pub hcgateway_username: Option<String>,
    /// Default HCGateway password, if configured
    pub hcgateway_password: Option<String>,
    /// Timeout applied to each HCGateway call
    pub request_timeout: Duration,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            hcgateway_base_url: "http://127.0.0.1:9".to_string(),
            hcgateway_username: None,
            hcgateway_password: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("hcgateway_base_url", &self.hcgateway_base_url)
            .field("hcgateway_username", &self.hcgateway_username)
            .field(
                "hcgateway_password",
                &self.hcgateway_password.as_ref().map(|_| "<redacted>"),
            )
            .field("request_timeout", &self.request_timeout)
            .field("frontend_url", &self.frontend_url)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let timeout_secs = match non_empty_var("HCGATEWAY_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("HCGATEWAY_TIMEOUT_SECS", v))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let port = match non_empty_var("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT", v))?,
            None => 8080,
        };

        Ok(Self {
            hcgateway_base_url: non_empty_var("HCGATEWAY_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            hcgateway_username: non_empty_var("HCGATEWAY_USERNAME"),
            hcgateway_password: non_empty_var("HCGATEWAY_PASSWORD"),
            request_timeout: Duration::from_secs(timeout_secs),
            frontend_url: non_empty_var("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:5173".to_string()),
            port,
        })
    }

    /// Configured default credentials, if both halves are set.
    pub fn default_credentials(&self) -> Option<Credentials> {
        match (&self.hcgateway_username, &self.hcgateway_password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            _ => None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Only this test touches these variables.
        env::set_var("HCGATEWAY_BASE_URL", "http://example.test/api/v2");
        env::set_var("HCGATEWAY_USERNAME", "test_user");
        env::set_var("HCGATEWAY_PASSWORD", "");
        env::set_var("HCGATEWAY_TIMEOUT_SECS", "3");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.hcgateway_base_url, "http://example.test/api/v2");
        assert_eq!(config.hcgateway_username.as_deref(), Some("test_user"));
        assert!(config.hcgateway_password.is_none());
        assert!(config.default_credentials().is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_default_credentials_requires_both() {
        let config = Config {
            hcgateway_username: Some("u".to_string()),
            hcgateway_password: Some("p".to_string()),
            ..Config::default()
        };
        assert_eq!(config.default_credentials(), Some(Credentials::new("u", "p")));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = Config {
            hcgateway_password: Some("hunter2".to_string()),
            ..Config::default()
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
