use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "VIDRESOLVE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/vidresolve.toml";
const ENV_PREFIX: &str = "VIDRESOLVE";
const ENV_SEPARATOR: &str = "__";

/// Resolve the file path from `VIDRESOLVE_CONFIG` after pulling `.env` into
/// the process environment, then layer file and environment over defaults.
pub fn load() -> Result<Config, ConfigError> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    load_from_sources(config_path)
}

/// Layer `config_path` (optional) and `VIDRESOLVE__*` variables over defaults
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!(path = %config_path.display(), "Reading config file");
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::debug!(path = %config_path.display(), "No config file, using defaults");
    }

    // VIDRESOLVE__PROVIDER__REQUEST_TIMEOUT -> provider.request_timeout
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:9000"

[provider]
request_timeout = "3s"
client_version = "19.29.1"

[fallback]
oembed_endpoint = "http://127.0.0.1:8081/oembed"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(
            config.provider.request_timeout.as_duration(),
            Duration::from_secs(3)
        );
        assert_eq!(config.provider.client_version, "19.29.1");
        // Untouched fields keep their defaults
        assert_eq!(config.provider.client_name, "ANDROID");
        assert_eq!(config.fallback.oembed_endpoint, "http://127.0.0.1:8081/oembed");
    }

    #[test]
    fn test_integer_timeout_is_seconds() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[provider]\nconnect_timeout = 2\n").unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(
            config.provider.connect_timeout.as_duration(),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn test_overflowing_timeout_is_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(
            &config_path,
            "[provider]\nrequest_timeout = \"999999999999999999m\"\n",
        )
        .unwrap();

        assert!(load_from_sources(config_path).is_err());
    }
}
