//! Vembed Server - embeddable media player pages.
//!
//! Serves an HTML player page with Open Graph and Twitter Card metadata for
//! any direct media URL, so that link unfurlers show the media inline. The
//! media itself is never proxied; pages only point at it.
//!
//! # URL Pattern
//!
//! ```text
//! GET /{media_url}[?a=audio][&i={thumbnail_url}][&w={width}][&h={height}]
//! ```
//!
//! # Security
//!
//! - Every media and thumbnail URL goes through the `vembed-core` pipeline:
//!   http/https only, media extensions only (unless audio is forced), and
//!   attribute-breaking characters removed
//! - All dynamic content is HTML-escaped by maud
//! - Content-Security-Policy limits player pages to media and images

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;
pub mod upload;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
