//! API utility functions
//!
//! Pure, stateless helpers for the download endpoints, kept out of
//! services.rs so they can be unit tested without a router.

use chrono::{DateTime, TimeZone};
use reqwest::Url;

use super::validation::MediaFormat;
use crate::api::error::ApiError;
use crate::config::RedirectConfig;

/// Third-party page for `video_id`, picked solely by `format`.
///
/// The id is appended as one percent-encoded path segment.
pub fn redirect_url(
    config: &RedirectConfig,
    video_id: &str,
    format: &MediaFormat,
) -> Result<String, ApiError> {
    let base = if format.is_audio() {
        &config.audio_base
    } else {
        &config.video_base
    };

    let mut url = Url::parse(base)
        .map_err(|e| ApiError::Internal(format!("invalid redirect base '{base}': {e}")))?;

    url.path_segments_mut()
        .map_err(|_| ApiError::Internal(format!("redirect base '{base}' cannot take a path")))?
        .pop_if_empty()
        .push(video_id);

    Ok(url.to_string())
}

/// `youtube_<id>_<YYYYMMDDHHMMSS>.<ext>`; characters outside the id alphabet become `_`
pub fn download_filename<Tz>(video_id: &str, format: &MediaFormat, at: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let safe_id: String = video_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "youtube_{}_{}.{}",
        safe_id,
        at.format("%Y%m%d%H%M%S"),
        format.extension()
    )
}
