//! The shared entry point used by every surface.

use std::sync::Arc;

use crate::embed::{EmbedOutcome, EmbedRequest, build_embed_url};
use crate::error::{Rejection, ResolutionError};
use crate::form::{EmbedForm, FormState};
use crate::inbound::InboundRequest;
use crate::normalize::{Normalized, normalize};
use crate::resolve::{MediaDescriptor, ResolveOptions, resolve};
use crate::sanitize::{SanitizedUrl, sanitize};
use crate::table::MediaTable;
use crate::validate::{ValidateOptions, ValidatedUrl, validate};

/// Normalize, validate, sanitize and resolve against one media table.
///
/// Cloning is cheap; the table is shared.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    table: Arc<MediaTable>,
}

impl Pipeline {
    pub fn new(table: MediaTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &MediaTable {
        &self.table
    }

    /// Normalize and validate. `Ok(None)` means empty input.
    pub fn validate(&self, raw: &str, opts: ValidateOptions) -> Result<Option<ValidatedUrl>, Rejection> {
        match normalize(raw)? {
            Normalized::Empty => Ok(None),
            Normalized::Url(url) => validate(url, opts, &self.table).map(Some),
        }
    }

    /// Normalize, validate and sanitize. `Ok(None)` means empty input.
    pub fn check(&self, raw: &str, opts: ValidateOptions) -> Result<Option<SanitizedUrl>, Rejection> {
        Ok(self.validate(raw, opts)?.map(sanitize))
    }

    /// Run the whole pipeline on a raw media URL.
    pub fn resolve(&self, raw: &str, opts: &ResolveOptions) -> Result<MediaDescriptor, ResolutionError> {
        let received_url = || match normalize(raw) {
            Ok(Normalized::Url(url)) => url.into_string(),
            _ => raw.to_string(),
        };

        let validate_opts = ValidateOptions {
            force_audio: opts.force_audio,
        };
        match self.check(raw, validate_opts) {
            Ok(Some(url)) => Ok(resolve(url, opts, &self.table)),
            Ok(None) => Err(ResolutionError {
                rejection: Rejection::MalformedUrl,
                received_url: received_url(),
            }),
            Err(rejection) => Err(ResolutionError {
                rejection,
                received_url: received_url(),
            }),
        }
    }

    /// Resolve a player request.
    pub fn resolve_inbound(&self, request: &InboundRequest) -> Result<MediaDescriptor, ResolutionError> {
        let result = self.resolve(&request.media_url, &request.resolve_options());
        if let Err(err) = &result {
            tracing::debug!(
                received_url = %err.received_url,
                code = err.rejection.code(),
                "rejected inbound media url"
            );
        }
        result
    }

    pub fn build_embed_url(&self, req: &EmbedRequest, base: &str) -> EmbedOutcome {
        build_embed_url(req, base, &self.table)
    }

    /// Settle a builder form.
    pub fn validate_form<'a>(&self, form: &'a mut EmbedForm) -> &'a FormState {
        form.validate(&self.table)
    }

    /// Descriptor for previewing a settled form. `None` unless it is valid.
    pub fn preview(&self, form: &EmbedForm) -> Option<MediaDescriptor> {
        if !matches!(form.state(), FormState::Valid(_)) {
            return None;
        }
        let request = form.request();
        let opts = ResolveOptions {
            force_audio: request.force_audio,
            thumbnail_url: request.thumbnail_url.clone(),
            ..Default::default()
        };
        self.resolve(&request.media_url, &opts).ok()
    }
}
