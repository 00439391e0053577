//! Configuration loading and validation.
//!
//! Settings come from an optional TOML file; every field has a default
//! so the service runs with no file at all. The FACEIT API key is the
//! one required secret and is sourced exclusively from the
//! `FACEIT_API_KEY` environment variable — never from the file, never
//! from source. A missing key is not fatal at startup: the handler
//! fails closed per request instead.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the FACEIT Data API bearer token.
pub const API_KEY_ENV: &str = "FACEIT_API_KEY";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Upstream API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceitConfig {
    /// API root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Game identifier used for history and elo extraction
    #[serde(default = "default_game")]
    pub game: String,

    /// How many recent matches to aggregate over
    #[serde(default = "default_match_limit")]
    pub match_limit: u32,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://open.faceit.com/data/v4".to_string()
}

fn default_game() -> String {
    "cs2".to_string()
}

fn default_match_limit() -> u32 {
    10
}

fn default_timeout() -> u64 {
    30
}

impl Default for FaceitConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            game: default_game(),
            match_limit: default_match_limit(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl FaceitConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub faceit: FaceitConfig,
}

impl Settings {
    /// Load settings from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.faceit.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "faceit.base_url must not be empty".to_string(),
            ));
        }
        if self.faceit.match_limit == 0 {
            return Err(ConfigError::ValidationError(
                "faceit.match_limit must be at least 1".to_string(),
            ));
        }
        if self.faceit.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "faceit.timeout_seconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The upstream bearer token, if configured in the environment.
    pub fn api_key() -> Option<String> {
        std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(Path::new("/nonexistent/config.toml")).unwrap();

        assert_eq!(settings.faceit.base_url, "https://open.faceit.com/data/v4");
        assert_eq!(settings.faceit.game, "cs2");
        assert_eq!(settings.faceit.match_limit, 10);
        assert_eq!(settings.faceit.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[faceit]\nmatch_limit = 5\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.faceit.match_limit, 5);
        assert_eq!(settings.faceit.game, "cs2");
    }

    #[test]
    fn test_zero_match_limit_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[faceit]\nmatch_limit = 0\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[faceit]\nbase_url = \"\"\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [[[").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
