use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::resolve::ResolutionError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),
    #[error("Could not extract video ID from URL")]
    InvalidReference,
    // Upstream detail stays in the logs
    #[error("Failed to fetch video information")]
    UpstreamUnavailable,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidReference => StatusCode::BAD_REQUEST,
            ApiError::UpstreamUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingParameter(_) => "MISSING_PARAMETER",
            ApiError::InvalidReference => "INVALID_REFERENCE",
            ApiError::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ResolutionError> for ApiError {
    fn from(value: ResolutionError) -> Self {
        match value {
            ResolutionError::InvalidReference { .. } => ApiError::InvalidReference,
            ResolutionError::UpstreamUnavailable { .. } => ApiError::UpstreamUnavailable,
        }
    }
}
