use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::{
    models::{
        DirectDownloadQuery, DirectDownloadResponse, DownloadQuery, DownloadResponse,
        HealthResponse, InfoQuery,
    },
    state::AppState,
    utils::{download_filename, redirect_url},
    validation::{
        QueryValidationError, validate_direct_download_query, validate_download_query,
        validate_info_query,
    },
};
use crate::api::error::ApiError;

/// Video info endpoint (GET /api/info?url=<reference>)
///
/// Runs the full resolution pipeline for one reference:
/// 1. Extract the canonical video id (400 if none)
/// 2. Query the player endpoint for full metadata and encodings
/// 3. On failure, query oEmbed and return the reduced catalog
/// 4. If both fail, 500 with a generic message (cause is only logged)
///
/// Every call goes upstream; nothing is cached between requests.
pub async fn get_info(
    State(state): State<AppState>,
    Query(query): Query<InfoQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let reference = validate_info_query(&query).map_err(map_query_error)?;

    let span = info_span!("resolve", request_id = %Uuid::now_v7());
    async move {
        info!(reference, "Received video info request");

        let catalog = state.orchestrator.resolve(reference).await?;

        Ok::<_, ApiError>((StatusCode::OK, Json(catalog)))
    }
    .instrument(span)
    .await
}

/// Download redirect endpoint (GET /api/download)
///
/// No transfer happens here: the response names a third-party page chosen by
/// `format` alone (`mp3` for audio, anything else for video). `itag` is
/// required but does not influence the target.
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let request = validate_download_query(&query).map_err(map_query_error)?;

    info!(
        video_id = %request.video_id,
        itag = %request.itag,
        format = %request.format,
        "Processing download request"
    );

    let redirect = redirect_url(&state.config.redirect, &request.video_id, &request.format)?;
    state.metrics.redirect_issued();

    info!(redirect_url = %redirect, "Redirecting to download service");

    let response = DownloadResponse {
        success: true,
        redirect_url: redirect,
        message: "Redirecting to download service".to_string(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Direct download endpoint (GET /api/direct-download)
///
/// Same redirect target as `/api/download`, plus a suggested local filename
/// stamped with the server's local time.
pub async fn direct_download(
    State(state): State<AppState>,
    Query(query): Query<DirectDownloadQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let request = validate_direct_download_query(&query).map_err(map_query_error)?;

    let redirect = redirect_url(&state.config.redirect, &request.video_id, &request.format)?;
    let filename = download_filename(&request.video_id, &request.format, chrono::Local::now());
    state.metrics.redirect_issued();

    info!(video_id = %request.video_id, %filename, redirect_url = %redirect, "Direct download prepared");

    let response = DirectDownloadResponse {
        success: true,
        redirect_url: redirect,
        filename,
    };

    Ok((StatusCode::OK, Json(response)))
}

fn map_query_error(err: QueryValidationError) -> ApiError {
    match err {
        QueryValidationError::Missing(name) => ApiError::MissingParameter(name),
    }
}

/// Health check endpoint (GET /health)
///
/// The service has no local dependencies to probe; upstream availability is
/// reflected in the resolution counters rather than in the status.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    use std::collections::HashMap;

    let mut components = HashMap::new();
    components.insert("api".to_string(), "healthy".to_string());
    components.insert("resolver".to_string(), "healthy".to_string());

    let response = HealthResponse {
        status: "healthy".to_string(),
        components,
        version: env!("CARGO_PKG_VERSION").to_string(),
        resolutions: state.metrics.snapshot(),
    };

    (StatusCode::OK, Json(response))
}
