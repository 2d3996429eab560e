//! Embed link construction.

use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::Rejection;
use crate::inbound::AUDIO_FLAG;
use crate::normalize::{Normalized, normalize};
use crate::resolve::resolve_thumbnail;
use crate::sanitize::sanitize;
use crate::table::MediaTable;
use crate::validate::{ValidateOptions, validate};

/// Characters that would split or corrupt a query value. Everything else in a
/// thumbnail URL stays literal.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+');

/// What the builder was asked to embed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedRequest {
    /// Raw media URL as typed or pasted.
    pub media_url: String,
    pub force_audio: bool,
    /// Raw thumbnail URL, if any.
    pub thumbnail_url: Option<String>,
}

impl EmbedRequest {
    pub fn new(media_url: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
            ..Default::default()
        }
    }
}

/// Result of building an embed link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedOutcome {
    /// Nothing entered. Holds the bare base URL for display.
    Empty(String),
    /// A shareable embed link.
    Link(String),
    /// The media URL was refused.
    Rejected(Rejection),
}

impl EmbedOutcome {
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Link(link) => Some(link),
            _ => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link(_))
    }
}

/// The text shown where the embed link goes: the base, the link, or the
/// rejection message.
impl fmt::Display for EmbedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(base) => f.write_str(base),
            Self::Link(link) => f.write_str(link),
            Self::Rejected(rejection) => write!(f, "{rejection}"),
        }
    }
}

/// Compose `{base}/{media}[?a=audio][&i={thumbnail}]`.
pub fn build_embed_url(req: &EmbedRequest, base: &str, table: &MediaTable) -> EmbedOutcome {
    let base = base.trim_end_matches('/');

    let url = match normalize(&req.media_url) {
        Ok(Normalized::Url(url)) => url,
        Ok(Normalized::Empty) => return EmbedOutcome::Empty(base.to_string()),
        Err(rejection) => return EmbedOutcome::Rejected(rejection),
    };

    let opts = ValidateOptions {
        force_audio: req.force_audio,
    };
    let media = match validate(url, opts, table) {
        Ok(url) => sanitize(url),
        Err(rejection) => return EmbedOutcome::Rejected(rejection),
    };

    // A fragment would swallow the parameters below.
    let media = media
        .as_str()
        .split_once('#')
        .map_or(media.as_str(), |(before, _)| before);

    let mut params = Vec::with_capacity(2);
    if req.force_audio {
        params.push(format!("a={AUDIO_FLAG}"));
    }
    if let Some(thumb) = req
        .thumbnail_url
        .as_deref()
        .and_then(|raw| resolve_thumbnail(raw, table))
    {
        params.push(format!("i={}", utf8_percent_encode(thumb.as_str(), QUERY_VALUE)));
    }

    let mut link = format!("{base}/{media}");
    if !params.is_empty() {
        link.push(if media.contains('?') { '&' } else { '?' });
        link.push_str(&params.join("&"));
    }

    tracing::debug!(%link, "built embed link");
    EmbedOutcome::Link(link)
}
