//! Environment configuration
//!
//! Loaded once at process start: the provider credential, the listening
//! port, and an optional base-URL override for OpenAI-compatible providers.

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "OpenAI API key not configured. Set the environment variable:\n\
         OPENAI_API_KEY=your-key-here\n\
         Obtain a key at: https://platform.openai.com/api-keys"
    )]
    MissingApiKey,

    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub port: u16,
    pub openai_base_url: String,
}

impl Config {
    /// Resolve configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| is_valid_key(key))
            .ok_or(ConfigError::MissingApiKey)?;

        let port = match std::env::var("PORT") {
            Err(_) => DEFAULT_PORT,
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
        };

        let openai_base_url = std::env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            openai_api_key,
            port,
            openai_base_url,
        })
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("OPENAI_API_KEY");
        std::env::remove_var("PORT");
        std::env::remove_var("OPENAI_BASE_URL");
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("sk-abc"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   "));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("OPENAI_API_KEY", "sk-test");

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.openai_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.openai_api_key, "sk-test");
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("OPENAI_API_KEY", "sk-test");
        std::env::set_var("PORT", "8080");
        std::env::set_var("OPENAI_BASE_URL", "http://localhost:9999/v1/");

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        // Trailing slash is normalized away
        assert_eq!(config.openai_base_url, "http://localhost:9999/v1");
    }

    #[test]
    #[serial]
    fn test_missing_key_is_an_error() {
        clear_env();
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_an_error() {
        clear_env();
        std::env::set_var("OPENAI_API_KEY", "sk-test");
        std::env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidPort(_))
        ));
    }
}
