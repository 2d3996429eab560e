//! Media descriptor resolution.

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::normalize::{Normalized, normalize};
use crate::sanitize::{SanitizedUrl, sanitize, sanitize_str};
use crate::table::{MediaTable, extension_of};
use crate::validate::validate_protocol;

/// Player width when none is supplied.
pub const DEFAULT_WIDTH: u32 = 1920;

/// Player height when none is supplied.
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Filename used when the URL path has no final segment.
const FALLBACK_FILENAME: &str = "media";

/// Resolution inputs besides the media URL itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub force_audio: bool,
    /// Raw, untrusted thumbnail URL.
    pub thumbnail_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Everything a renderer needs to build a player page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    pub url: SanitizedUrl,
    pub mime_type: &'static str,
    pub is_audio: bool,
    pub filename: String,
    pub thumbnail_url: Option<SanitizedUrl>,
    pub width: u32,
    pub height: u32,
}

impl MediaDescriptor {
    /// HTML element name for the player.
    pub fn media_tag(&self) -> &'static str {
        if self.is_audio { "audio" } else { "video" }
    }
}

/// Build a descriptor from a sanitized media URL.
pub fn resolve(url: SanitizedUrl, opts: &ResolveOptions, table: &MediaTable) -> MediaDescriptor {
    let filename = filename_of(url.path());
    let mime_type = table.mime_for(extension_of(&filename), opts.force_audio);
    let is_audio = opts.force_audio || mime_type.starts_with("audio/");

    let thumbnail_url = opts
        .thumbnail_url
        .as_deref()
        .and_then(|raw| resolve_thumbnail(raw, table));

    MediaDescriptor {
        url,
        mime_type,
        is_audio,
        filename,
        thumbnail_url,
        width: opts.width.unwrap_or(DEFAULT_WIDTH),
        height: opts.height.unwrap_or(DEFAULT_HEIGHT),
    }
}

/// Run a raw thumbnail URL through normalize, protocol check and sanitize.
///
/// Anything that fails is dropped; thumbnails are optional.
pub fn resolve_thumbnail(raw: &str, table: &MediaTable) -> Option<SanitizedUrl> {
    let url = match normalize(raw) {
        Ok(Normalized::Url(url)) => url,
        Ok(Normalized::Empty) => return None,
        Err(rejection) => {
            tracing::debug!(thumbnail = %raw, code = rejection.code(), "dropping thumbnail");
            return None;
        }
    };

    match validate_protocol(url, table) {
        Ok(url) => Some(sanitize(url)),
        Err(rejection) => {
            tracing::debug!(thumbnail = %raw, code = rejection.code(), "dropping thumbnail");
            None
        }
    }
}

/// Final segment of a parsed URL path, percent-decoded and sanitized.
pub fn filename_of(path: &str) -> String {
    let segment = path.rsplit('/').next().unwrap_or_default();
    let decoded = sanitize_str(&percent_decode_str(segment).decode_utf8_lossy());
    if decoded.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        decoded
    }
}
