//! Primary resolver backed by the provider's player endpoint.
//!
//! One POST per request returns video details plus the full list of
//! encodings. Progressive (muxed) encodings become the video formats, the
//! best audio-only adaptive encoding becomes the single audio format.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::{debug, warn};

use super::http::UpstreamClient;
use super::traits::{CatalogResolver, ResolutionFailure};
use super::types::{CatalogSource, StreamFormat, VideoCatalog, VideoId};
use crate::config::ProviderConfig;

pub const AUDIO_ONLY_LABEL: &str = "Audio Only";

// ==================== Player API request ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerRequest<'a> {
    video_id: &'a str,
    context: RequestContext<'a>,
    content_check_ok: bool,
    racy_check_ok: bool,
}

#[derive(Debug, Serialize)]
struct RequestContext<'a> {
    client: ClientContext<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientContext<'a> {
    client_name: &'a str,
    client_version: &'a str,
    hl: &'a str,
    /// Canonical watch URL rebuilt from the identifier
    original_url: &'a str,
}

// ==================== Player API response ====================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerResponse {
    pub playability_status: Option<PlayabilityStatus>,
    pub video_details: Option<VideoDetails>,
    pub streaming_data: Option<StreamingData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayabilityStatus {
    pub status: String,
    pub reason: Option<String>,
}

/// Counts arrive as decimal strings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoDetails {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub length_seconds: Option<String>,
    pub view_count: Option<String>,
    pub thumbnail: Option<ThumbnailList>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThumbnailList {
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StreamingData {
    /// Progressive encodings (audio and video in one file)
    #[serde(default)]
    pub formats: Vec<RawFormat>,
    #[serde(default)]
    pub adaptive_formats: Vec<RawFormat>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawFormat {
    pub itag: u32,
    pub mime_type: String,
    pub bitrate: Option<u64>,
    pub average_bitrate: Option<u64>,
    pub height: Option<u32>,
    pub quality_label: Option<String>,
    pub content_length: Option<String>,
}

impl RawFormat {
    /// Split `video/mp4; codecs="..."` into (`video`, `mp4`)
    fn media_type(&self) -> Option<(String, String)> {
        let parsed: mime::Mime = self.mime_type.parse().ok()?;
        Some((
            parsed.type_().as_str().to_string(),
            parsed.subtype().as_str().to_string(),
        ))
    }

    /// Vertical resolution, from `height` or the leading digits of the label
    fn resolution(&self) -> u32 {
        self.height.unwrap_or_else(|| {
            self.quality_label
                .as_deref()
                .map(|label| {
                    label
                        .chars()
                        .take_while(char::is_ascii_digit)
                        .collect::<String>()
                })
                .and_then(|digits| digits.parse().ok())
                .unwrap_or(0)
        })
    }

    fn abr(&self) -> u64 {
        self.average_bitrate.or(self.bitrate).unwrap_or(0)
    }

    fn content_length(&self) -> u64 {
        parse_count(self.content_length.as_deref())
    }
}

fn parse_count(value: Option<&str>) -> u64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

// ==================== Catalog building ====================

/// Progressive formats, highest resolution first (ties: higher bitrate first)
pub(crate) fn progressive_formats(raw: &[RawFormat]) -> Vec<StreamFormat> {
    let mut progressive: Vec<(&RawFormat, String)> = raw
        .iter()
        .filter_map(|f| match f.media_type() {
            Some((kind, subtype)) if kind == "video" => Some((f, subtype)),
            _ => None,
        })
        .collect();

    progressive.sort_by_key(|(f, _)| Reverse((f.resolution(), f.bitrate.unwrap_or(0))));

    progressive
        .into_iter()
        .map(|(f, subtype)| StreamFormat {
            itag: f.itag.to_string(),
            mime_type: format!("video/{subtype}"),
            quality_label: f
                .quality_label
                .clone()
                .unwrap_or_else(|| format!("{}p", f.resolution())),
            bitrate: f.bitrate.unwrap_or(0),
            has_video: true,
            has_audio: true,
            container: subtype,
            content_length: f.content_length(),
        })
        .collect()
}

/// The single highest average-bitrate audio-only encoding, if any
pub(crate) fn best_audio_format(adaptive: &[RawFormat]) -> Option<StreamFormat> {
    adaptive
        .iter()
        .filter_map(|f| match f.media_type() {
            Some((kind, subtype)) if kind == "audio" => Some((f, subtype)),
            _ => None,
        })
        // max_by_key keeps the last maximum; reverse so the provider's first wins ties
        .rev()
        .max_by_key(|(f, _)| f.abr())
        .map(|(f, subtype)| StreamFormat {
            itag: f.itag.to_string(),
            mime_type: format!("audio/{subtype}"),
            quality_label: AUDIO_ONLY_LABEL.to_string(),
            bitrate: f.bitrate.unwrap_or(0),
            has_video: false,
            has_audio: true,
            container: subtype,
            content_length: f.content_length(),
        })
}

/// Build a catalog from a decoded player response, or explain why not
pub(crate) fn catalog_from_player(
    id: &VideoId,
    response: PlayerResponse,
) -> Result<VideoCatalog, String> {
    if let Some(playability) = &response.playability_status {
        if playability.status != "OK" {
            return Err(format!(
                "video not playable: {} ({})",
                playability.status,
                playability.reason.as_deref().unwrap_or("no reason given")
            ));
        }
    }

    let details = response
        .video_details
        .ok_or_else(|| "response carried no video details".to_string())?;
    let streaming = response
        .streaming_data
        .ok_or_else(|| "response carried no streaming data".to_string())?;

    let mut formats = progressive_formats(&streaming.formats);
    formats.extend(best_audio_format(&streaming.adaptive_formats));

    if formats.is_empty() {
        return Err("no progressive or audio-only encodings available".to_string());
    }

    let thumbnail_url = details
        .thumbnail
        .and_then(|list| list.thumbnails.into_iter().last())
        .map(|thumb| thumb.url)
        .unwrap_or_else(|| format!("https://img.youtube.com/vi/{id}/maxresdefault.jpg"));

    Ok(VideoCatalog {
        video_id: id.clone(),
        title: details.title,
        author: details.author,
        length_seconds: parse_count(details.length_seconds.as_deref()),
        view_count: parse_count(details.view_count.as_deref()),
        thumbnail_url,
        formats,
    })
}

// ==================== PlayerResolver ====================

/// Resolves identifiers through the provider's player endpoint
#[derive(Debug, Clone)]
pub struct PlayerResolver {
    client: UpstreamClient,
    endpoint: String,
    client_name: String,
    client_version: String,
}

impl PlayerResolver {
    pub fn new(client: UpstreamClient, config: &ProviderConfig) -> Self {
        Self {
            client,
            endpoint: config.player_endpoint.clone(),
            client_name: config.client_name.clone(),
            client_version: config.client_version.clone(),
        }
    }
}

#[async_trait]
impl CatalogResolver for PlayerResolver {
    fn name(&self) -> &'static str {
        "player"
    }

    async fn resolve(&self, id: &VideoId) -> Result<VideoCatalog, ResolutionFailure> {
        let watch_url = id.watch_url();
        debug!(video_id = %id, url = %watch_url, "Querying player endpoint");

        let request = PlayerRequest {
            video_id: id.as_str(),
            context: RequestContext {
                client: ClientContext {
                    client_name: &self.client_name,
                    client_version: &self.client_version,
                    hl: "en",
                    original_url: &watch_url,
                },
            },
            content_check_ok: true,
            racy_check_ok: true,
        };

        let response: PlayerResponse = self
            .client
            .post_json(&self.endpoint, &request)
            .await
            .map_err(|e| {
                warn!(video_id = %id, error = %e, "Player request failed");
                ResolutionFailure::new(CatalogSource::Primary, e.to_string())
            })?;

        let catalog = catalog_from_player(id, response).map_err(|cause| {
            warn!(video_id = %id, %cause, "Player response unusable");
            ResolutionFailure::new(CatalogSource::Primary, cause)
        })?;

        debug!(
            video_id = %id,
            formats = catalog.formats.len(),
            "Player catalog built"
        );

        Ok(catalog)
    }
}
