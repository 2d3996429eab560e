//! Error types for the embed service.
//!
//! Errors are rendered as JSON. Player routes return the same body so that a
//! person pasting a bad link sees why it was refused.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use vembed_core::ResolutionError;

/// Code reported when the hosting service refuses or fails an upload.
pub const UPLOAD_FAILED: &str = "UPLOAD_FAILED";

/// Embed service error type.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// The media URL was refused by the pipeline.
    #[error("invalid media url: {0}")]
    InvalidMedia(#[from] ResolutionError),

    /// The upload request itself is unusable (no file, wrong extension).
    #[error("bad upload: {0}")]
    BadUpload(String),

    /// The hosting service did not return a usable URL.
    #[error("upload failed")]
    Upload {
        /// Upstream detail, sent to clients only when configured.
        details: Option<String>,
    },

    /// The multipart body could not be read.
    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    received_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ErrorResponse {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            received_url: None,
            details: None,
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::InvalidMedia(err) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: err.rejection.to_string(),
                    code: Some(err.rejection.code()),
                    received_url: Some(err.received_url),
                    details: None,
                },
            ),
            Self::BadUpload(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::message(msg)),
            Self::Upload { details } => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse {
                    details,
                    ..ErrorResponse::message(UPLOAD_FAILED)
                },
            ),
            Self::Multipart(err) => {
                tracing::debug!(error = %err, "unreadable multipart body");
                (err.status(), ErrorResponse::message(err.body_text()))
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::message("An internal error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
