use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{
    services::{direct_download, download, get_info, health},
    state::AppState,
};
use crate::config::Config;
use crate::observability::Metrics;
use crate::resolve::Orchestrator;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All routes with their middleware, ready for `axum::serve` or `oneshot`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/info", get(get_info))
        .route("/api/download", get(download))
        .route("/api/direct-download", get(direct_download))
        .route("/health", get(health))
        .with_state(state)
        // Browser frontends call the API cross-origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: Config, address: Option<SocketAddr>) -> Result<(), AnyError> {
    let address = address.unwrap_or(config.server.bind_addr);

    let metrics = Arc::new(Metrics::new());
    let orchestrator = Orchestrator::from_config(&config, metrics.clone())
        .map_err(|e| format!("Failed to build upstream client: {}", e))?;

    info!(
        player = %config.provider.player_endpoint,
        oembed = %config.fallback.oembed_endpoint,
        timeout = %config.provider.request_timeout,
        "Resolution pipeline ready"
    );

    let state = AppState::new(config, orchestrator, metrics);
    let app = router(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "vidresolve API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate())
            .expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
