use crate::humanize::HumanDuration;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub redirect: RedirectConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

/// Primary metadata provider (player endpoint) settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default = "default_player_endpoint")]
    pub player_endpoint: String,
    #[serde(default = "default_client_name")]
    pub client_name: String,
    #[serde(default = "default_client_version")]
    pub client_version: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Ceiling for one upstream round-trip, shared by primary and fallback
    #[serde(default = "default_request_timeout")]
    pub request_timeout: HumanDuration,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: HumanDuration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            player_endpoint: default_player_endpoint(),
            client_name: default_client_name(),
            client_version: default_client_version(),
            user_agent: default_user_agent(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

fn default_player_endpoint() -> String {
    "https://www.youtube.com/youtubei/v1/player".to_string()
}

// ANDROID responses carry plain stream URLs without a signature cipher
fn default_client_name() -> String {
    "ANDROID".to_string()
}

fn default_client_version() -> String {
    "20.10.38".to_string()
}

fn default_user_agent() -> String {
    concat!("vidresolve/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_request_timeout() -> HumanDuration {
    HumanDuration::from_secs(10)
}

fn default_connect_timeout() -> HumanDuration {
    HumanDuration::from_secs(5)
}

/// oEmbed fallback settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FallbackConfig {
    #[serde(default = "default_oembed_endpoint")]
    pub oembed_endpoint: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            oembed_endpoint: default_oembed_endpoint(),
        }
    }
}

fn default_oembed_endpoint() -> String {
    "https://www.youtube.com/oembed".to_string()
}

/// Third-party download service targets for the download endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedirectConfig {
    #[serde(default = "default_video_base")]
    pub video_base: String,
    #[serde(default = "default_audio_base")]
    pub audio_base: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            video_base: default_video_base(),
            audio_base: default_audio_base(),
        }
    }
}

fn default_video_base() -> String {
    "https://www.y2mate.com/youtube".to_string()
}

fn default_audio_base() -> String {
    "https://www.y2mate.com/youtube-mp3".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:5000");
        assert_eq!(config.provider.client_name, "ANDROID");
        assert_eq!(
            config.provider.request_timeout.as_duration(),
            Duration::from_secs(10)
        );
        assert_eq!(config.fallback.oembed_endpoint, "https://www.youtube.com/oembed");
        assert!(config.redirect.audio_base.ends_with("youtube-mp3"));
    }
}
