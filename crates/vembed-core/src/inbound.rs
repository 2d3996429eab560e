//! Parsing of inbound player requests: `/{media}?a=audio&i=..&w=..&h=..`.

use url::form_urlencoded;

use crate::resolve::{DEFAULT_HEIGHT, DEFAULT_WIDTH, ResolveOptions};

/// Value of the `a` parameter that forces audio.
pub const AUDIO_FLAG: &str = "audio";

/// A player request split into the media URL and the embed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    /// Raw media URL: the path tail plus any query pairs that belong to it.
    pub media_url: String,
    pub force_audio: bool,
    pub thumbnail_url: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl InboundRequest {
    /// Split a request path tail and raw query string.
    ///
    /// `path_tail` is everything after the route prefix, still encoded.
    /// Query pairs other than `a`, `i`, `w` and `h` are re-attached to the
    /// media URL verbatim, in their original order.
    pub fn from_parts(path_tail: &str, query: Option<&str>) -> Self {
        let mut request = Self {
            media_url: path_tail.trim_start_matches('/').to_string(),
            force_audio: false,
            thumbnail_url: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        };

        let mut media_query = Vec::new();
        for piece in query.unwrap_or_default().split('&').filter(|p| !p.is_empty()) {
            let Some((key, value)) = form_urlencoded::parse(piece.as_bytes()).next() else {
                continue;
            };
            match key.as_ref() {
                "a" => request.force_audio = value == AUDIO_FLAG,
                "i" => request.thumbnail_url = Some(value.into_owned()).filter(|v| !v.is_empty()),
                "w" => request.width = dimension(&value, DEFAULT_WIDTH),
                "h" => request.height = dimension(&value, DEFAULT_HEIGHT),
                _ => media_query.push(piece),
            }
        }

        if !media_query.is_empty() {
            request.media_url.push('?');
            request.media_url.push_str(&media_query.join("&"));
        }

        request
    }

    /// Options for the resolver.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            force_audio: self.force_audio,
            thumbnail_url: self.thumbnail_url.clone(),
            width: Some(self.width),
            height: Some(self.height),
        }
    }
}

fn dimension(value: &str, default: u32) -> u32 {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|v| *v > 0)
        .unwrap_or(default)
}
