use std::fmt;
use thiserror::Error;

use super::models::{DirectDownloadQuery, DownloadQuery, InfoQuery};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryValidationError {
    #[error("{0} parameter is required")]
    Missing(&'static str),
}

const DEFAULT_VIDEO_EXTENSION: &str = "mp4";

/// Output requested from the download service.
///
/// Only `mp3` selects the audio page; every other value selects the video
/// page and survives as the filename extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaFormat {
    Mp3,
    Video(String),
}

impl Default for MediaFormat {
    fn default() -> Self {
        MediaFormat::Video(DEFAULT_VIDEO_EXTENSION.to_string())
    }
}

impl MediaFormat {
    /// Absent or blank means mp4. Non-alphanumeric characters are dropped
    /// from the extension.
    pub fn from_param(value: Option<&str>) -> Self {
        let extension: String = value
            .unwrap_or_default()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match extension.as_str() {
            "" => MediaFormat::default(),
            "mp3" => MediaFormat::Mp3,
            _ => MediaFormat::Video(extension),
        }
    }

    pub fn extension(&self) -> &str {
        match self {
            MediaFormat::Mp3 => "mp3",
            MediaFormat::Video(extension) => extension,
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, MediaFormat::Mp3)
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub video_id: String,
    pub itag: String,
    pub format: MediaFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectDownloadRequest {
    pub video_id: String,
    pub format: MediaFormat,
}

/// Empty and whitespace-only values count as missing
fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, QueryValidationError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(QueryValidationError::Missing(name))
}

pub fn validate_info_query(query: &InfoQuery) -> Result<&str, QueryValidationError> {
    required(&query.url, "URL")
}

pub fn validate_download_query(
    query: &DownloadQuery,
) -> Result<DownloadRequest, QueryValidationError> {
    let video_id = required(&query.video_id, "videoId")?;
    let itag = required(&query.itag, "itag")?;
    let format = MediaFormat::from_param(query.format.as_deref());

    Ok(DownloadRequest {
        video_id: video_id.to_string(),
        itag: itag.to_string(),
        format,
    })
}

pub fn validate_direct_download_query(
    query: &DirectDownloadQuery,
) -> Result<DirectDownloadRequest, QueryValidationError> {
    let video_id = required(&query.video_id, "videoId")?;
    let format = MediaFormat::from_param(query.format.as_deref());

    Ok(DirectDownloadRequest {
        video_id: video_id.to_string(),
        format,
    })
}
