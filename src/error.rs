//! Error types for the odds proxy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Missing or unusable configuration. Surfaced to the client as HTTP 500
/// with an explicit message; everything else in the data path degrades to
/// an empty result instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required setting {0} is not set")]
    Missing(&'static str),

    #[error("required setting {0} is set but empty")]
    Empty(&'static str),
}

/// Failure while fetching or decoding the upstream payload. These are
/// logged and absorbed into an empty match list, never propagated to the
/// HTTP client.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("payload is not valid JSON after quote repair: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("payload shape mismatch: {0}")]
    Shape(&'static str),
}

/// A match start time that does not parse as a 12-hour clock string.
#[derive(Debug, Error)]
#[error("invalid 12-hour time string: {0:?}")]
pub struct InvalidTimeFormat(pub String);

/// Top-level handler error, rendered as `{error, message}` with HTTP 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (error, message) = match &self {
            ApiError::Config(e) => ("configuration_error", e.to_string()),
            ApiError::Internal(e) => ("internal_error", e.to_string()),
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": error, "message": message })),
        )
            .into_response()
    }
}
