use async_trait::async_trait;
use thiserror::Error;

use super::types::{CatalogSource, VideoCatalog, VideoId};

/// Single failure signal from a resolution stage.
///
/// Stages collapse every upstream problem (transport, timeout, status,
/// decoding, unplayable video) into this one type. `cause` is for logs only.
#[derive(Debug, Clone, Error)]
#[error("{stage} resolution failed: {cause}")]
pub struct ResolutionFailure {
    pub stage: CatalogSource,
    pub cause: String,
}

impl ResolutionFailure {
    pub fn new(stage: CatalogSource, cause: impl Into<String>) -> Self {
        Self {
            stage,
            cause: cause.into(),
        }
    }
}

/// Terminal outcome of the whole pipeline when no catalog could be produced
#[derive(Debug, Clone, Error)]
pub enum ResolutionError {
    #[error("could not extract a video id from '{reference}'")]
    InvalidReference { reference: String },

    #[error("upstream unavailable: {detail}")]
    UpstreamUnavailable { detail: String },
}

/// One stage of the resolution pipeline.
///
/// Implementations take an already-validated identifier, perform at most one
/// upstream round-trip and return a complete catalog or a failure. They hold
/// no per-request state and are shared across requests.
#[async_trait]
pub trait CatalogResolver: Send + Sync {
    /// Stage name (for logging)
    fn name(&self) -> &'static str;

    async fn resolve(&self, id: &VideoId) -> Result<VideoCatalog, ResolutionFailure>;
}
