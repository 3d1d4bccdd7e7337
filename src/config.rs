use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Gemini API key; the service still runs on local ranking without it
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Gemini model name
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Upper bound on a single remote advisor call
    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,

    /// Set to false to serve local rankings only
    #[serde(default = "default_remote_enabled")]
    pub remote_enabled: bool,

    /// Path to the product catalog JSON file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_remote_timeout_secs() -> u64 {
    30
}

fn default_remote_enabled() -> bool {
    true
}

fn default_catalog_path() -> String {
    "data/products.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Returns the Gemini credential, treating a blank value as missing
    pub fn gemini_credential(&self) -> AppResult<&str> {
        match self.gemini_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(AppError::Configuration(
                "GEMINI_API_KEY environment variable is not set".to_string(),
            )),
        }
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: Vec<(&str, &str)>) -> Config {
        envy::from_iter(
            vars.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let config = config_from(vec![]);
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.remote_timeout_secs, 30);
        assert!(config.remote_enabled);
        assert_eq!(config.catalog_path, "data/products.json");
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_missing_credential_is_configuration_error() {
        let config = config_from(vec![]);
        assert!(matches!(
            config.gemini_credential(),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_blank_credential_is_configuration_error() {
        let config = config_from(vec![("GEMINI_API_KEY", "   ")]);
        assert!(config.gemini_credential().is_err());
    }

    #[test]
    fn test_overrides_from_env() {
        let config = config_from(vec![
            ("GEMINI_API_KEY", "secret"),
            ("REMOTE_TIMEOUT_SECS", "5"),
            ("REMOTE_ENABLED", "false"),
            ("PORT", "8080"),
        ]);
        assert_eq!(config.gemini_credential().unwrap(), "secret");
        assert_eq!(config.remote_timeout(), Duration::from_secs(5));
        assert!(!config.remote_enabled);
        assert_eq!(config.port, 8080);
    }
}
