//! Vembed Server - HTTP server for embeddable media player pages.
//!
//! Configuration comes from `VEMBED_*` environment variables (optionally
//! loaded from a `.env` file); the flags below override single values.

use anyhow::Context;
use axum::Router;
use axum::http::Request;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use vembed_server::{AppState, Config, router};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "vembed_server=info,vembed_core=info,tower_http=info";

/// Vembed - embeddable player pages for direct media links.
#[derive(Parser, Debug)]
#[command(name = "vembed-server")]
#[command(about = "Embeddable media player pages with Open Graph metadata", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,

    /// Bind address, overriding VEMBED_BIND_ADDR.
    #[arg(long)]
    bind: Option<String>,

    /// Public base URL for embed links, overriding VEMBED_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Load and validate the configuration, then exit.
    #[arg(long)]
    check_config: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.bind_addr = bind.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env file if it exists
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)
            .with_context(|| format!("failed to load {}", args.dotenv))?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    args.apply(&mut config);
    let bind_addr = config.bind_addr.clone();

    let state = AppState::new(config).context("failed to build application state")?;

    if args.check_config {
        println!("configuration is valid");
        return Ok(());
    }

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to determine listener address")?;
    tracing::info!(addr = %local_addr, "starting embed server");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("embed server stopped");
    Ok(())
}

/// Router plus request tracing and permissive CORS.
fn app(state: AppState) -> Router {
    router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    query = request.uri().query().unwrap_or_default(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Resolve on Ctrl+C or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(%error, "failed to listen for ctrl+c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => tracing::warn!(%error, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "vembed-server",
            "--bind",
            "127.0.0.1:9000",
            "--base-url",
            "https://v.example/",
        ]);
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.base_url, "https://v.example");
        assert!(!args.check_config);
    }

    #[test]
    fn no_flags_keep_config() {
        let args = Args::parse_from(["vembed-server", "--check-config"]);
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.bind_addr, Config::default().bind_addr);
        assert!(args.check_config);
    }
}
