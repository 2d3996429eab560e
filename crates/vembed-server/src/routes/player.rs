//! Player page route.
//!
//! Handles `GET /{media}` where `media` is the full media URL, optionally
//! followed by `?a=audio&i={thumbnail}&w={width}&h={height}`.

use axum::extract::State;
use axum::http::Uri;
use axum::response::Response;
use vembed_core::InboundRequest;

use crate::error::ServeError;
use crate::render;
use crate::state::AppState;

use super::html_response;

/// Prefix of the older player route.
const LEGACY_PREFIX: &str = "/api/video/";

/// Player pages depend only on their URL.
const PLAYER_CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=86400";

/// Handle a player request.
///
/// The raw request URI is used instead of a `Path` extractor: the media URL
/// must reach the normalizer with its own encoding intact.
pub async fn player_handler(State(state): State<AppState>, uri: Uri) -> Result<Response, ServeError> {
    render_player(&state, uri.path().strip_prefix('/').unwrap_or(uri.path()), uri.query())
}

/// Handle a player request on the legacy `/api/video/` prefix.
pub async fn legacy_player_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, ServeError> {
    let tail = uri.path().strip_prefix(LEGACY_PREFIX).unwrap_or(uri.path());
    render_player(&state, tail, uri.query())
}

fn render_player(state: &AppState, tail: &str, query: Option<&str>) -> Result<Response, ServeError> {
    let request = InboundRequest::from_parts(tail, query);
    let media = state.pipeline.resolve_inbound(&request)?;

    tracing::debug!(
        url = %media.url,
        mime = media.mime_type,
        is_audio = media.is_audio,
        "rendering player"
    );

    let markup = render::player::render(&media, &state.config.site_name);
    Ok(html_response(
        markup.into_string(),
        render::components::PLAYER_CSP,
        PLAYER_CACHE_CONTROL,
    ))
}
