//! API models for the vidresolve HTTP surface.
//!
//! - `GET /api/info?url=<reference>` returns a [`VideoCatalog`](crate::resolve::VideoCatalog)
//! - `GET /api/download?videoId=&itag=&format=` returns a [`DownloadResponse`]
//! - `GET /api/direct-download?videoId=&format=` returns a [`DirectDownloadResponse`]
//!
//! Query parameters are all optional at the type level so that a missing
//! parameter produces the JSON `MissingParameter` error instead of a plain
//! text extractor rejection.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::observability::MetricsSnapshot;

#[derive(Debug, Default, Deserialize)]
pub struct InfoQuery {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadQuery {
    pub video_id: Option<String>,
    pub itag: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectDownloadQuery {
    pub video_id: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub success: bool,
    pub redirect_url: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DirectDownloadResponse {
    pub success: bool,
    pub redirect_url: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: HashMap<String, String>,
    pub version: String,
    pub resolutions: MetricsSnapshot,
}
