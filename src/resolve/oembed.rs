//! Fallback resolver backed by the public oEmbed endpoint.
//!
//! oEmbed only knows title, author and thumbnail. The format list is
//! synthesized: a 360p progressive MP4 (tag 18) and a 128 kbps AAC audio
//! track (tag 140). Neither is checked for actual availability.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http::UpstreamClient;
use super::innertube::AUDIO_ONLY_LABEL;
use super::traits::{CatalogResolver, ResolutionFailure};
use super::types::{CatalogSource, StreamFormat, VideoCatalog, VideoId};
use crate::config::FallbackConfig;

#[derive(Debug, Deserialize)]
pub(crate) struct OembedResponse {
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// The fixed two-entry format list asserted for every fallback catalog
pub fn synthetic_formats() -> Vec<StreamFormat> {
    vec![
        StreamFormat {
            itag: "18".to_string(),
            mime_type: "video/mp4".to_string(),
            quality_label: "360p".to_string(),
            bitrate: 0,
            has_video: true,
            has_audio: true,
            container: "mp4".to_string(),
            content_length: 0,
        },
        StreamFormat {
            itag: "140".to_string(),
            mime_type: "audio/mp4".to_string(),
            quality_label: AUDIO_ONLY_LABEL.to_string(),
            bitrate: 128_000,
            has_video: false,
            has_audio: true,
            container: "mp4".to_string(),
            content_length: 0,
        },
    ]
}

pub(crate) fn catalog_from_oembed(id: &VideoId, response: OembedResponse) -> VideoCatalog {
    VideoCatalog {
        video_id: id.clone(),
        title: response
            .title
            .unwrap_or_else(|| "Unknown Title".to_string()),
        author: response.author_name.unwrap_or_else(|| "Unknown".to_string()),
        // Not available from oEmbed
        length_seconds: 0,
        view_count: 0,
        thumbnail_url: response.thumbnail_url.unwrap_or_default(),
        formats: synthetic_formats(),
    }
}

/// Resolves identifiers through the oEmbed endpoint
#[derive(Debug, Clone)]
pub struct OembedResolver {
    client: UpstreamClient,
    endpoint: String,
}

impl OembedResolver {
    pub fn new(client: UpstreamClient, config: &FallbackConfig) -> Self {
        Self {
            client,
            endpoint: config.oembed_endpoint.clone(),
        }
    }
}

#[async_trait]
impl CatalogResolver for OembedResolver {
    fn name(&self) -> &'static str {
        "oembed"
    }

    async fn resolve(&self, id: &VideoId) -> Result<VideoCatalog, ResolutionFailure> {
        let watch_url = id.watch_url();
        debug!(video_id = %id, "Querying oEmbed endpoint");

        let response: OembedResponse = self
            .client
            .get_json(&self.endpoint, &[("url", watch_url.as_str()), ("format", "json")])
            .await
            .map_err(|e| {
                warn!(video_id = %id, error = %e, "oEmbed request failed");
                ResolutionFailure::new(CatalogSource::Fallback, e.to_string())
            })?;

        Ok(catalog_from_oembed(id, response))
    }
}
