//! Runtime settings for the resolver service.
//!
//! Four sections, each with working defaults so an empty file (or none at
//! all) yields a usable service:
//!
//! - `[server]`: listen address
//! - `[provider]`: player endpoint, client identity, upstream timeouts
//! - `[fallback]`: oEmbed endpoint
//! - `[redirect]`: third-party pages the download endpoints point at
//!
//! Sources are layered defaults < TOML file < `.env` < process environment.
//! The file path comes from `VIDRESOLVE_CONFIG` (default
//! `config/vidresolve.toml`). Environment keys use double underscores:
//!
//! ```text
//! VIDRESOLVE__SERVER__BIND_ADDR=0.0.0.0:9000
//! VIDRESOLVE__PROVIDER__REQUEST_TIMEOUT=5s
//! VIDRESOLVE__FALLBACK__OEMBED_ENDPOINT=http://localhost:8081/oembed
//! ```
//!
//! ```no_run
//! use vidresolve::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("player endpoint: {}", config.provider.player_endpoint);
//! ```

mod models;
mod sources;
mod validation;

pub use crate::humanize::HumanDuration;
pub use models::{Config, FallbackConfig, ProviderConfig, RedirectConfig, ServerConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load every layer, then reject endpoint URLs that are not absolute
    /// http(s) and timeouts outside `(0, 120s]`.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Same as [`Config::load`] but with an explicit file instead of `VIDRESOLVE_CONFIG`
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[server]\nbind_addr = \"127.0.0.1:5001\"\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:5001");
        assert_eq!(config.provider.player_endpoint, "https://www.youtube.com/youtubei/v1/player");
    }

    #[test]
    fn test_validation_catches_bad_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[provider]
player_endpoint = "not a url"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_full_config_example() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "0.0.0.0:8080"

[provider]
player_endpoint = "https://youtubei.googleapis.com/youtubei/v1/player"
client_name = "IOS"
client_version = "19.29.1"
user_agent = "vidresolve-test"
request_timeout = "8s"
connect_timeout = "1500ms"

[fallback]
oembed_endpoint = "https://www.youtube.com/oembed"

[redirect]
video_base = "https://downloads.example.com/video"
audio_base = "https://downloads.example.com/audio"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.provider.client_name, "IOS");
        assert_eq!(
            config.provider.connect_timeout.as_duration(),
            Duration::from_millis(1500)
        );
        assert_eq!(config.redirect.audio_base, "https://downloads.example.com/audio");
    }
}
