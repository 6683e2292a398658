use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use lustre_core::{EnhanceConfig, Enhancer, FetchConfig, HttpFetcher};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod routes;

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lustre_server=info,lustre_core=info,tower_http=info")),
        )
        .init();

    let config_path = std::env::var_os("LUSTRE_CONFIG").map(PathBuf::from);
    let config = EnhanceConfig::load(config_path.as_deref()).context("Failed to load config")?;
    let fetcher = HttpFetcher::new(FetchConfig::default()).context("Failed to build HTTP client")?;

    tracing::info!(?config, "Loaded enrichment config");

    let app = routes::router(Enhancer::new(config, fetcher)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
    );

    let addr = std::env::var("LUSTRE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
