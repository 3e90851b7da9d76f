use super::models::Config;
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

const MAX_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} must be an absolute http/https URL, got '{value}'")]
    InvalidEndpoint { field: String, value: String },

    #[error("{field} must be positive")]
    ZeroTimeout { field: String },

    #[error("{field} ({actual}) exceeds limit of {limit}")]
    TimeoutTooLarge {
        field: String,
        actual: String,
        limit: String,
    },

    #[error("connect_timeout ({connect}) exceeds request_timeout ({request})")]
    ConnectExceedsRequest { connect: String, request: String },

    #[error("provider client_name and client_version must not be empty")]
    MissingClientIdentity,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_endpoints(config)?;
    validate_timeouts(config)?;
    validate_client(config)?;
    Ok(())
}

/// Every upstream and redirect target must be an absolute http(s) URL
fn validate_endpoints(config: &Config) -> Result<(), ValidationError> {
    let endpoints = [
        ("provider.player_endpoint", &config.provider.player_endpoint),
        ("fallback.oembed_endpoint", &config.fallback.oembed_endpoint),
        ("redirect.video_base", &config.redirect.video_base),
        ("redirect.audio_base", &config.redirect.audio_base),
    ];

    for (field, value) in endpoints {
        let valid = Url::parse(value)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false);

        if !valid {
            return Err(ValidationError::InvalidEndpoint {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }

    Ok(())
}

fn validate_timeouts(config: &Config) -> Result<(), ValidationError> {
    let request = config.provider.request_timeout;
    let connect = config.provider.connect_timeout;

    for (field, value) in [
        ("provider.request_timeout", request),
        ("provider.connect_timeout", connect),
    ] {
        if value.as_duration().is_zero() {
            return Err(ValidationError::ZeroTimeout {
                field: field.to_string(),
            });
        }

        if value.as_duration() > MAX_TIMEOUT {
            return Err(ValidationError::TimeoutTooLarge {
                field: field.to_string(),
                actual: value.to_string(),
                limit: "120s".to_string(),
            });
        }
    }

    if connect > request {
        return Err(ValidationError::ConnectExceedsRequest {
            connect: connect.to_string(),
            request: request.to_string(),
        });
    }

    Ok(())
}

fn validate_client(config: &Config) -> Result<(), ValidationError> {
    if config.provider.client_name.trim().is_empty()
        || config.provider.client_version.trim().is_empty()
    {
        return Err(ValidationError::MissingClientIdentity);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::humanize::HumanDuration;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_relative_endpoint_rejected() {
        let mut config = Config::default();
        config.fallback.oembed_endpoint = "/oembed".to_string();

        let result = validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidEndpoint { ref field, .. }) if field == "fallback.oembed_endpoint"
        ));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = Config::default();
        config.redirect.video_base = "ftp://mirror.example.com/youtube".to_string();

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.provider.request_timeout = HumanDuration::from_secs(0);

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::ZeroTimeout { .. })));
    }

    #[test]
    fn test_timeout_ceiling() {
        let mut config = Config::default();
        config.provider.request_timeout = HumanDuration::from_secs(600);

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::TimeoutTooLarge { .. })));
    }

    #[test]
    fn test_connect_exceeds_request() {
        let mut config = Config::default();
        config.provider.request_timeout = HumanDuration::from_secs(2);
        config.provider.connect_timeout = HumanDuration::from_secs(5);

        let result = validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::ConnectExceedsRequest { .. })
        ));
    }

    #[test]
    fn test_empty_client_identity() {
        let mut config = Config::default();
        config.provider.client_version = "  ".to_string();

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::MissingClientIdentity)));
    }
}
