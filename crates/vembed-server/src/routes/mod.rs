//! Route definitions for the embed service.
//!
//! ## Routes
//!
//! - `GET /` - Builder page
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - `GET /api/embed` - Builder as JSON
//! - `GET /api/descriptor/{media}` - Media descriptor as JSON
//! - `POST /api/upload` - Upload relay
//! - `GET /api/video/{media}` - Player page (legacy prefix)
//! - `GET /{media}` - Player page

mod descriptor;
mod embed;
mod health;
mod home;
mod player;
mod upload;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};

use crate::state::AppState;

/// Build the complete embed service router.
pub fn router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(home::home_page))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .route("/api/embed", get(embed::embed_handler))
        .route("/api/descriptor/{*media}", get(descriptor::descriptor_handler))
        .route(
            "/api/upload",
            post(upload::upload_handler).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/video/{*media}", get(player::legacy_player_handler))
        .route("/{*media}", get(player::player_handler))
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers.
///
/// Unfurlers must be able to fetch player pages.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\n",
    )
}

/// Build an HTML response with security and cache headers.
fn html_response(html: String, csp: &'static str, cache_control: &'static str) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(csp),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    (StatusCode::OK, headers, html).into_response()
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, Response};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::state::AppState;

    pub const BASE: &str = "https://v.example";

    pub fn app() -> Router {
        app_with(Config {
            base_url: BASE.to_string(),
            ..Config::default()
        })
    }

    pub fn app_with(config: Config) -> Router {
        super::router(AppState::new(config).expect("state should build"))
    }

    pub async fn get(app: Router, uri: &str) -> Response<Body> {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .expect("request should succeed")
    }

    pub async fn body_string(response: Response<Body>) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body to bytes");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        serde_json::from_str(&body_string(response).await).expect("json body")
    }
}
