//! Upload relay endpoint.
//!
//! Accepts `multipart/form-data` with a `file` part and an optional `type`
//! part (`video` or `thumbnail`).

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use vembed_core::EmbedRequest;

use crate::error::ServeError;
use crate::state::AppState;
use crate::upload::{self, UploadKind, UploadedFile};

/// Successful upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Hosted URL of the file.
    pub url: String,
    /// Embed link for the hosted file (video uploads only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
}

/// Handle `POST /api/upload`.
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ServeError> {
    let mut file = None;
    let mut kind = UploadKind::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                file = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            "type" => kind = field.text().await?.parse()?,
            _ => {}
        }
    }

    let file = file
        .filter(|f| !f.bytes.is_empty() || !f.filename.is_empty())
        .ok_or_else(|| ServeError::BadUpload("No file uploaded".to_string()))?;

    let url = upload::relay(
        &state.http,
        &state.config,
        state.pipeline.table(),
        kind,
        file,
    )
    .await?;

    let embed_url = match kind {
        UploadKind::Video => state
            .pipeline
            .build_embed_url(&EmbedRequest::new(url.as_str()), &state.config.base_url)
            .link()
            .map(str::to_string),
        UploadKind::Thumbnail => None,
    };

    Ok(Json(UploadResponse { url, embed_url }))
}
