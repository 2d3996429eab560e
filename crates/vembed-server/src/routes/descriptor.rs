//! JSON media descriptor endpoint.
//!
//! Same input as a player page; returns the resolved [`MediaDescriptor`]
//! instead of HTML.

use axum::Json;
use axum::extract::State;
use axum::http::Uri;
use vembed_core::{InboundRequest, MediaDescriptor};

use crate::error::ServeError;
use crate::state::AppState;

const PREFIX: &str = "/api/descriptor/";

/// Handle `GET /api/descriptor/{media}`.
pub async fn descriptor_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<MediaDescriptor>, ServeError> {
    let tail = uri.path().strip_prefix(PREFIX).unwrap_or_default();
    let request = InboundRequest::from_parts(tail, uri.query());
    Ok(Json(state.pipeline.resolve_inbound(&request)?))
}
