use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a canonical video identifier
pub const VIDEO_ID_LEN: usize = 11;

/// Canonical 11-character video identifier (`[a-zA-Z0-9_-]{11}`)
///
/// Only constructible through [`VideoId::parse`], so holding one means the
/// token is well formed. Nothing is checked against a live catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    pub fn parse(candidate: &str) -> Option<Self> {
        let valid = candidate.len() == VIDEO_ID_LEN
            && candidate
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

        valid.then(|| VideoId(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL; the only form ever sent upstream
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VideoId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        VideoId::parse(&value).ok_or_else(|| format!("invalid video id: {value}"))
    }
}

impl From<VideoId> for String {
    fn from(value: VideoId) -> Self {
        value.0
    }
}

/// One downloadable variant of a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFormat {
    /// Provider-assigned format tag
    pub itag: String,
    pub mime_type: String,
    pub quality_label: String,
    /// Bits per second, 0 when unknown
    pub bitrate: u64,
    pub has_video: bool,
    pub has_audio: bool,
    pub container: String,
    /// Bytes, 0 when unknown
    pub content_length: u64,
}

/// Normalized metadata plus ordered stream variants for one video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCatalog {
    pub video_id: VideoId,
    pub title: String,
    pub author: String,
    pub length_seconds: u64,
    pub view_count: u64,
    pub thumbnail_url: String,
    pub formats: Vec<StreamFormat>,
}

/// Which resolution stage produced a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Primary,
    Fallback,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Primary => f.write_str("primary"),
            CatalogSource::Fallback => f.write_str("fallback"),
        }
    }
}
