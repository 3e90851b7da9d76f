//! Logging setup and resolution counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber; `RUST_LOG` overrides `default_level`
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Metrics handle for recording resolution outcomes
#[derive(Debug, Default)]
pub struct Metrics {
    resolutions_requested: AtomicU64,
    primary_hits: AtomicU64,
    fallback_hits: AtomicU64,
    upstream_failures: AtomicU64,
    invalid_references: AtomicU64,
    redirects_issued: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution_requested(&self) {
        self.resolutions_requested.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "resolutions_requested", "Metric incremented");
    }

    pub fn primary_hit(&self) {
        self.primary_hits.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "primary_hits", "Metric incremented");
    }

    pub fn fallback_hit(&self) {
        self.fallback_hits.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "fallback_hits", "Metric incremented");
    }

    pub fn upstream_failed(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "upstream_failures", "Metric incremented");
    }

    pub fn invalid_reference(&self) {
        self.invalid_references.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "invalid_references", "Metric incremented");
    }

    pub fn redirect_issued(&self) {
        self.redirects_issued.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "redirects_issued", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            resolutions_requested: self.resolutions_requested.load(Ordering::Relaxed),
            primary_hits: self.primary_hits.load(Ordering::Relaxed),
            fallback_hits: self.fallback_hits.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
            invalid_references: self.invalid_references.load(Ordering::Relaxed),
            redirects_issued: self.redirects_issued.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub resolutions_requested: u64,
    pub primary_hits: u64,
    pub fallback_hits: u64,
    pub upstream_failures: u64,
    pub invalid_references: u64,
    pub redirects_issued: u64,
}
