//! Vembed Core - URL validation and media-descriptor resolution.
//!
//! This crate turns an untrusted, user-supplied string into either a media
//! descriptor that can be rendered into a player page, or an embed link that
//! points at such a page. Every entry point (the builder page, the JSON API,
//! the player route) goes through the same [`Pipeline`].
//!
//! # Stages
//!
//! ```text
//! raw input -> normalize -> validate -> sanitize -> resolve -> MediaDescriptor
//!                                                \-> build_embed_url -> EmbedOutcome
//! ```
//!
//! - **Normalize**: percent-decodes, repairs `http:/host` into `http://host`,
//!   requires the result to parse as a URL
//! - **Validate**: http/https only, plus a media extension unless audio is forced
//! - **Sanitize**: deletes `<`, `>`, `"` and `'`
//! - **Resolve**: extension to MIME type, audio/video mode, display filename
//! - **Embed**: `{base}/{media}[?a=audio][&i={thumbnail}]`
//!
//! Each stage produces its own newtype, so a [`SanitizedUrl`] can only be
//! obtained from a [`ValidatedUrl`], which in turn requires a [`NormalizedUrl`].
//!
//! All functions are pure and synchronous. A [`Pipeline`] holds only immutable
//! tables and can be shared across threads without locking.

mod embed;
mod error;
mod form;
mod inbound;
mod normalize;
mod pipeline;
mod resolve;
mod sanitize;
pub mod table;
mod validate;

pub use embed::{EmbedOutcome, EmbedRequest, build_embed_url};
pub use error::{Rejection, ResolutionError};
pub use form::{EmbedForm, FormState};
pub use inbound::{AUDIO_FLAG, InboundRequest};
pub use normalize::{Normalized, NormalizedUrl, normalize};
pub use pipeline::Pipeline;
pub use resolve::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, MediaDescriptor, ResolveOptions, filename_of, resolve,
    resolve_thumbnail,
};
pub use sanitize::{SanitizedUrl, sanitize, sanitize_str};
pub use table::MediaTable;
pub use validate::{ValidateOptions, ValidatedUrl, validate, validate_protocol};
