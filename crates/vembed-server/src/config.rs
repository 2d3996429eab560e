//! Application configuration loaded from environment variables.

use std::time::Duration;

use anyhow::Context;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Public base URL of this service, without trailing slash.
    /// Embed links are `{base_url}/{media_url}`.
    pub base_url: String,

    /// Site name shown in OG tags.
    pub site_name: String,

    /// Hosting endpoint that receives relayed uploads.
    pub upload_url: String,

    /// Account hash sent with uploads. Empty for anonymous uploads.
    pub upload_userhash: String,

    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: usize,

    /// Timeout for the relayed upload request.
    pub upload_timeout: Duration,

    /// Include upstream error details in upload failure responses.
    pub expose_error_details: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            base_url: "http://localhost:8080".to_string(),
            site_name: "Embedded Video".to_string(),
            upload_url: "https://catbox.moe/user/api.php".to_string(),
            upload_userhash: String::new(),
            max_upload_bytes: 200 * 1024 * 1024,
            upload_timeout: Duration::from_secs(120),
            expose_error_details: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `VEMBED_BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `VEMBED_BASE_URL`: Base URL for embed links (default: "http://localhost:8080")
    /// - `VEMBED_SITE_NAME`: Site name (default: "Embedded Video")
    /// - `VEMBED_UPLOAD_URL`: Upload hosting endpoint (default: catbox)
    /// - `VEMBED_UPLOAD_USERHASH`: Hosting account hash (default: empty)
    /// - `VEMBED_MAX_UPLOAD_MB`: Upload size limit in MiB (default: 200)
    /// - `VEMBED_UPLOAD_TIMEOUT_SECS`: Upload timeout (default: 120)
    /// - `VEMBED_EXPOSE_ERROR_DETAILS`: "true"/"1" to expose upstream errors
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = std::env::var("VEMBED_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let base_url = std::env::var("VEMBED_BASE_URL")
            .unwrap_or(defaults.base_url)
            .trim_end_matches('/')
            .to_string();

        let site_name = std::env::var("VEMBED_SITE_NAME").unwrap_or(defaults.site_name);

        let upload_url = std::env::var("VEMBED_UPLOAD_URL").unwrap_or(defaults.upload_url);

        let upload_userhash =
            std::env::var("VEMBED_UPLOAD_USERHASH").unwrap_or(defaults.upload_userhash);

        let max_upload_bytes = match std::env::var("VEMBED_MAX_UPLOAD_MB") {
            Ok(raw) => {
                let mb: usize = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid VEMBED_MAX_UPLOAD_MB: {raw:?}"))?;
                anyhow::ensure!(mb > 0, "VEMBED_MAX_UPLOAD_MB must be positive");
                mb.saturating_mul(1024 * 1024)
            }
            Err(_) => defaults.max_upload_bytes,
        };

        let upload_timeout = match std::env::var("VEMBED_UPLOAD_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("invalid VEMBED_UPLOAD_TIMEOUT_SECS: {raw:?}"))?,
            ),
            Err(_) => defaults.upload_timeout,
        };

        let expose_error_details = std::env::var("VEMBED_EXPOSE_ERROR_DETAILS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.expose_error_details);

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            site_name = %site_name,
            upload_url = %upload_url,
            max_upload_bytes,
            upload_timeout_secs = upload_timeout.as_secs(),
            expose_error_details,
            "vembed configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            site_name,
            upload_url,
            upload_userhash,
            max_upload_bytes,
            upload_timeout,
            expose_error_details,
        })
    }
}
