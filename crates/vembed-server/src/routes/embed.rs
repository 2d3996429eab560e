//! JSON builder endpoint: the builder page without the page.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use vembed_core::FormState;

use crate::state::AppState;

use super::home::BuilderQuery;

/// Builder result.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum EmbedResponse {
    Empty {
        #[serde(rename = "embedUrl")]
        embed_url: String,
    },
    Valid {
        #[serde(rename = "embedUrl")]
        embed_url: String,
    },
    Invalid {
        error: String,
        code: &'static str,
        message: String,
    },
}

/// Handle `GET /api/embed?url=..&thumbnail=..&audio=..`.
pub async fn embed_handler(State(state): State<AppState>, Query(query): Query<BuilderQuery>) -> Response {
    let form = query.into_form(&state);

    match form.state() {
        FormState::Valid(link) => Json(EmbedResponse::Valid {
            embed_url: link.clone(),
        })
        .into_response(),
        FormState::Invalid(rejection) => (
            StatusCode::BAD_REQUEST,
            Json(EmbedResponse::Invalid {
                error: rejection.to_string(),
                code: rejection.code(),
                message: form.display_text(),
            }),
        )
            .into_response(),
        FormState::Empty | FormState::Validating => Json(EmbedResponse::Empty {
            embed_url: form.base().to_string(),
        })
        .into_response(),
    }
}
