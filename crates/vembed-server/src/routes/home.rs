//! Builder page.

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;
use vembed_core::EmbedForm;

use crate::render;
use crate::state::AppState;

use super::html_response;

/// Builder inputs, shared by the page and the JSON API.
#[derive(Debug, Default, Deserialize)]
pub struct BuilderQuery {
    url: Option<String>,
    thumbnail: Option<String>,
    audio: Option<String>,
}

impl BuilderQuery {
    /// Apply the inputs to a fresh form and settle it.
    pub fn into_form(self, state: &AppState) -> EmbedForm {
        let mut form = EmbedForm::new(state.config.base_url.as_str());
        form.set_media_url(self.url.unwrap_or_default());
        form.set_thumbnail_url(self.thumbnail);
        form.set_force_audio(self.audio.as_deref().is_some_and(is_truthy));
        state.pipeline.validate_form(&mut form);
        form
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "on" | "true" | "audio" | "yes"
    )
}

/// Render the builder page.
pub async fn home_page(State(state): State<AppState>, Query(query): Query<BuilderQuery>) -> Response {
    let form = query.into_form(&state);
    let preview = state.pipeline.preview(&form);
    let markup = render::home::render(
        &form,
        preview.as_ref(),
        state.pipeline.table(),
        &state.config.site_name,
    );
    html_response(
        markup.into_string(),
        render::components::HOME_CSP,
        "public, max-age=60",
    )
}
