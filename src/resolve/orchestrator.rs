use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::extract::extract;
use super::http::{HttpConfig, UpstreamClient, UpstreamError};
use super::innertube::PlayerResolver;
use super::oembed::OembedResolver;
use super::traits::{CatalogResolver, ResolutionError, ResolutionFailure};
use super::types::{CatalogSource, VideoCatalog, VideoId};
use crate::config::Config;
use crate::observability::Metrics;

/// Runs extraction, then the primary stage, then the fallback stage.
///
/// Each stage is attempted at most once and bounded by `stage_timeout`.
/// Holds no per-request state, so one instance serves concurrent requests.
#[derive(Clone)]
pub struct Orchestrator {
    primary: Arc<dyn CatalogResolver>,
    fallback: Arc<dyn CatalogResolver>,
    stage_timeout: Duration,
    metrics: Arc<Metrics>,
}

impl Orchestrator {
    pub fn new(
        primary: Arc<dyn CatalogResolver>,
        fallback: Arc<dyn CatalogResolver>,
        stage_timeout: Duration,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            primary,
            fallback,
            stage_timeout,
            metrics,
        }
    }

    /// Wire the player and oEmbed resolvers over one shared HTTP client
    pub fn from_config(config: &Config, metrics: Arc<Metrics>) -> Result<Self, UpstreamError> {
        let client = UpstreamClient::new(HttpConfig::from(&config.provider))?;

        Ok(Self::new(
            Arc::new(PlayerResolver::new(client.clone(), &config.provider)),
            Arc::new(OembedResolver::new(client, &config.fallback)),
            config.provider.request_timeout.as_duration(),
            metrics,
        ))
    }

    /// Resolve a raw reference into a catalog.
    ///
    /// Fallback output is returned only when the primary stage failed. When
    /// both fail the error carries the primary cause.
    pub async fn resolve(&self, reference: &str) -> Result<VideoCatalog, ResolutionError> {
        self.metrics.resolution_requested();

        let Some(id) = extract(reference) else {
            self.metrics.invalid_reference();
            return Err(ResolutionError::InvalidReference {
                reference: reference.to_string(),
            });
        };

        let primary_failure = match self.run_stage(&self.primary, CatalogSource::Primary, &id).await {
            Ok(catalog) => {
                self.metrics.primary_hit();
                info!(video_id = %id, title = %catalog.title, "Resolved video via primary");
                return Ok(catalog);
            }
            Err(failure) => failure,
        };

        warn!(
            video_id = %id,
            cause = %primary_failure.cause,
            fallback = self.fallback.name(),
            "Primary resolution failed, falling back"
        );

        match self.run_stage(&self.fallback, CatalogSource::Fallback, &id).await {
            Ok(catalog) => {
                self.metrics.fallback_hit();
                info!(video_id = %id, title = %catalog.title, "Resolved limited video info via fallback");
                Ok(catalog)
            }
            Err(fallback_failure) => {
                self.metrics.upstream_failed();
                warn!(
                    video_id = %id,
                    primary = %primary_failure.cause,
                    fallback = %fallback_failure.cause,
                    "All resolution stages failed"
                );
                Err(ResolutionError::UpstreamUnavailable {
                    detail: primary_failure.cause,
                })
            }
        }
    }

    async fn run_stage(
        &self,
        resolver: &Arc<dyn CatalogResolver>,
        stage: CatalogSource,
        id: &VideoId,
    ) -> Result<VideoCatalog, ResolutionFailure> {
        match tokio::time::timeout(self.stage_timeout, resolver.resolve(id)).await {
            Ok(result) => result,
            Err(_) => Err(ResolutionFailure::new(
                stage,
                format!(
                    "{} stage exceeded {}ms deadline",
                    resolver.name(),
                    self.stage_timeout.as_millis()
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::oembed::synthetic_formats;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted stage: returns a canned catalog or failure and counts calls
    struct StubResolver {
        stage: CatalogSource,
        succeed: bool,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl StubResolver {
        fn new(stage: CatalogSource, succeed: bool) -> Arc<Self> {
            Arc::new(Self {
                stage,
                succeed,
                delay: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn slow(stage: CatalogSource, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                stage,
                succeed: true,
                delay: Some(delay),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogResolver for StubResolver {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn resolve(&self, id: &VideoId) -> Result<VideoCatalog, ResolutionFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if !self.succeed {
                return Err(ResolutionFailure::new(self.stage, format!("{} down", self.stage)));
            }
            Ok(VideoCatalog {
                video_id: id.clone(),
                title: format!("{} title", self.stage),
                author: "author".to_string(),
                length_seconds: 0,
                view_count: 0,
                thumbnail_url: String::new(),
                formats: synthetic_formats(),
            })
        }
    }

    fn orchestrator(
        primary: Arc<StubResolver>,
        fallback: Arc<StubResolver>,
    ) -> (Orchestrator, Arc<Metrics>) {
        let metrics = Arc::new(Metrics::new());
        let orchestrator = Orchestrator::new(
            primary,
            fallback,
            Duration::from_millis(200),
            metrics.clone(),
        );
        (orchestrator, metrics)
    }

    #[tokio::test]
    async fn test_invalid_reference_skips_upstream() {
        let primary = StubResolver::new(CatalogSource::Primary, true);
        let fallback = StubResolver::new(CatalogSource::Fallback, true);
        let (orchestrator, metrics) = orchestrator(primary.clone(), fallback.clone());

        let err = orchestrator.resolve("not a url").await.unwrap_err();

        assert!(matches!(err, ResolutionError::InvalidReference { .. }));
        assert_eq!(primary.calls(), 0);
        assert_eq!(fallback.calls(), 0);
        assert_eq!(metrics.snapshot().invalid_references, 1);
    }

    #[tokio::test]
    async fn test_primary_success_never_touches_fallback() {
        let primary = StubResolver::new(CatalogSource::Primary, true);
        let fallback = StubResolver::new(CatalogSource::Fallback, true);
        let (orchestrator, metrics) = orchestrator(primary.clone(), fallback.clone());

        let catalog = orchestrator.resolve("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        assert_eq!(catalog.title, "primary title");
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 0);
        assert_eq!(metrics.snapshot().primary_hits, 1);
    }

    #[tokio::test]
    async fn test_primary_failure_uses_fallback_once() {
        let primary = StubResolver::new(CatalogSource::Primary, false);
        let fallback = StubResolver::new(CatalogSource::Fallback, true);
        let (orchestrator, metrics) = orchestrator(primary.clone(), fallback.clone());

        let catalog = orchestrator.resolve("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(catalog.title, "fallback title");
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 1);
        assert_eq!(metrics.snapshot().fallback_hits, 1);
    }

    #[tokio::test]
    async fn test_both_failing_reports_primary_cause() {
        let primary = StubResolver::new(CatalogSource::Primary, false);
        let fallback = StubResolver::new(CatalogSource::Fallback, false);
        let (orchestrator, metrics) = orchestrator(primary.clone(), fallback.clone());

        let err = orchestrator.resolve("dQw4w9WgXcQ").await.unwrap_err();

        match err {
            ResolutionError::UpstreamUnavailable { detail } => assert_eq!(detail, "primary down"),
            other => panic!("expected UpstreamUnavailable, got {other:?}"),
        }
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 1);
        assert_eq!(metrics.snapshot().upstream_failures, 1);
    }

    #[tokio::test]
    async fn test_slow_primary_is_abandoned_at_deadline() {
        let primary = StubResolver::slow(CatalogSource::Primary, Duration::from_secs(5));
        let fallback = StubResolver::new(CatalogSource::Fallback, true);
        let (orchestrator, _metrics) = orchestrator(primary.clone(), fallback.clone());

        let catalog = orchestrator.resolve("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(catalog.title, "fallback title");
        assert_eq!(fallback.calls(), 1);
    }
}
