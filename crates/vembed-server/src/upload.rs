//! Upload relay to the external hosting service.
//!
//! The file is held in memory only for the duration of the request and
//! forwarded as a multipart form. The hosting service answers with the
//! hosted URL as plain text.

use std::fmt;
use std::str::FromStr;

use reqwest::multipart::{Form, Part};
use vembed_core::MediaTable;

use crate::config::Config;
use crate::error::ServeError;

/// What the uploaded file will be used for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadKind {
    #[default]
    Video,
    Thumbnail,
}

impl FromStr for UploadKind {
    type Err = ServeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "video" => Ok(Self::Video),
            "thumbnail" => Ok(Self::Thumbnail),
            other => Err(ServeError::BadUpload(format!("Unknown upload type: {other}"))),
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Video => "video",
            Self::Thumbnail => "thumbnail",
        })
    }
}

/// A file received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// MIME type to declare upstream, or `None` if the extension is not
    /// acceptable for `kind`.
    pub fn mime_type(&self, kind: UploadKind, table: &MediaTable) -> Option<&'static str> {
        match kind {
            UploadKind::Video => table
                .has_media_extension(&self.filename)
                .then(|| table.mime_for(vembed_core::table::extension_of(&self.filename), false)),
            UploadKind::Thumbnail => table.image_mime(&self.filename),
        }
    }
}

/// Check the file against `kind` and forward it to the hosting service.
///
/// Returns the hosted URL, trimmed.
pub async fn relay(
    client: &reqwest::Client,
    config: &Config,
    table: &MediaTable,
    kind: UploadKind,
    file: UploadedFile,
) -> Result<String, ServeError> {
    let mime = file.mime_type(kind, table).ok_or_else(|| {
        tracing::debug!(filename = %file.filename, %kind, "rejecting upload extension");
        ServeError::BadUpload("Invalid file extension".to_string())
    })?;

    let size = file.bytes.len();
    let part = Part::bytes(file.bytes)
        .file_name(file.filename.clone())
        .mime_str(mime)
        .map_err(|e| ServeError::Internal(e.into()))?;

    let form = Form::new()
        .text("reqtype", "fileupload")
        .text("userhash", config.upload_userhash.clone())
        .part("fileToUpload", part);

    tracing::info!(filename = %file.filename, %kind, size, mime, "relaying upload");

    let response = client
        .post(&config.upload_url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| upload_failed(config, format!("upload request failed: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| upload_failed(config, format!("unreadable upload response: {e}")))?;

    if !status.is_success() || !body.starts_with("https://") {
        return Err(upload_failed(
            config,
            format!("hosting service returned {status}: {}", body.trim()),
        ));
    }

    let url = body.trim().to_string();
    tracing::info!(filename = %file.filename, %url, "upload hosted");
    Ok(url)
}

fn upload_failed(config: &Config, details: String) -> ServeError {
    tracing::warn!(details = %details, "upload relay failed");
    ServeError::Upload {
        details: config.expose_error_details.then_some(details),
    }
}
