//! Application state shared across all request handlers.

use std::sync::Arc;

use anyhow::Context;
use vembed_core::Pipeline;

use crate::config::Config;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Validation pipeline shared by every route.
    pub pipeline: Pipeline,

    /// HTTP client for the upload relay.
    pub http: reqwest::Client,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upload_timeout)
            .user_agent(concat!("vembed/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build upload client")?;

        let pipeline = Pipeline::default();

        tracing::info!(
            media_types = pipeline.table().media().len(),
            upload_timeout_secs = config.upload_timeout.as_secs(),
            "application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            pipeline,
            http,
        })
    }
}
