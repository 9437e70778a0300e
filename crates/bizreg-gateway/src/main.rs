//! Bizreg Gateway - business-registration submission service.
//!
//! This is the main entry point for the gateway. Configuration comes from
//! the environment:
//!
//! - `LISTEN_ADDR` - bind address (default `0.0.0.0:8080`)
//! - `UPSTREAM_URL` - registration upstream endpoint

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bizreg_gateway::{create_router, AppState, GatewayConfig};
use bizreg_upstream::{HttpSubmitClient, UpstreamConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bizreg=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Bizreg Gateway");

    // Load configuration from environment
    let mut config = GatewayConfig::default();
    if let Ok(listen_addr) = std::env::var("LISTEN_ADDR") {
        config.listen_addr = listen_addr;
    }
    if let Ok(upstream_url) = std::env::var("UPSTREAM_URL") {
        config.upstream_url = upstream_url;
    }

    tracing::info!(
        listen_addr = %config.listen_addr,
        upstream_url = %config.upstream_url,
        rate_limit_quota = config.rate_limit_quota,
        "Gateway configuration loaded"
    );

    // Upstream client with idempotent replay and bounded retries
    let client = Arc::new(HttpSubmitClient::new(UpstreamConfig::new(
        config.upstream_url.clone(),
    )));

    // Build gateway state and router
    let state = AppState::new(client, config.clone());
    let app = create_router(state);

    // Start HTTP server; connect info is needed for rate-limit identities
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
