// API Server Binary Entry Point
//
// Purpose: Start the Axum crop advisor API
// Usage: cargo run --features api --bin api_server

use anyhow::Context;
use crop_scorer_rust::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "crop_scorer_rust=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = ServerConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!(
        "  CROP_CATALOG: {}",
        config
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );
    tracing::info!("  SIMULATED_LATENCY: {}", config.simulate_latency);
    tracing::info!("  SOIL_CACHE_TTL_SECS: {}", config.soil_cache_ttl.as_secs());
    tracing::info!("  PORT: {}", config.port);

    let port = config.port;
    let state = AppState::new(config).context("Failed to initialize application state")?;
    tracing::info!("Application state initialized successfully");

    // Create router with all endpoints and middleware
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
