//! Builder form state: the embed link follows the inputs as they are edited.

use crate::embed::{EmbedOutcome, EmbedRequest, build_embed_url};
use crate::error::Rejection;
use crate::table::MediaTable;

/// Where the form currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// No media URL entered.
    Empty,
    /// Inputs changed since the last validation.
    Validating,
    /// The current inputs produce this embed link.
    Valid(String),
    /// The current media URL was refused.
    Invalid(Rejection),
}

/// Inputs of the builder page and the state derived from them.
///
/// Edits never fail: an [`FormState::Invalid`] form accepts further edits,
/// which move it back to [`FormState::Validating`] (or [`FormState::Empty`]).
#[derive(Debug, Clone)]
pub struct EmbedForm {
    base: String,
    request: EmbedRequest,
    state: FormState,
}

impl EmbedForm {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            request: EmbedRequest::default(),
            state: FormState::Empty,
        }
    }

    pub fn set_media_url(&mut self, url: impl Into<String>) {
        self.request.media_url = url.into();
        self.mark_dirty();
    }

    pub fn set_thumbnail_url(&mut self, url: Option<String>) {
        self.request.thumbnail_url = url.filter(|u| !u.trim().is_empty());
        self.mark_dirty();
    }

    pub fn set_force_audio(&mut self, force_audio: bool) {
        self.request.force_audio = force_audio;
        self.mark_dirty();
    }

    /// Resolve a pending edit into `Valid` or `Invalid`.
    pub fn validate(&mut self, table: &MediaTable) -> &FormState {
        if self.state == FormState::Validating {
            self.state = match build_embed_url(&self.request, &self.base, table) {
                EmbedOutcome::Empty(_) => FormState::Empty,
                EmbedOutcome::Link(link) => FormState::Valid(link),
                EmbedOutcome::Rejected(rejection) => FormState::Invalid(rejection),
            };
        }
        &self.state
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn request(&self) -> &EmbedRequest {
        &self.request
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Text for the embed-link area: the base while empty or pending, then
    /// the link or the rejection message.
    pub fn display_text(&self) -> String {
        match &self.state {
            FormState::Empty | FormState::Validating => self.base.clone(),
            FormState::Valid(link) => link.clone(),
            FormState::Invalid(rejection) => rejection.to_string(),
        }
    }

    fn mark_dirty(&mut self) {
        self.state = if self.request.media_url.trim().is_empty() {
            FormState::Empty
        } else {
            FormState::Validating
        };
    }
}
