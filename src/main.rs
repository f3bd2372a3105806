//! Test Readiness Analyzer - HTTP server entrypoint
//!
//! Standalone analysis server with a REST API for A/B test proposals.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::limit::ConcurrencyLimitLayer;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tracing::info;

use testready::config::ServerConfig;
use testready::handlers::{build_api_routes, build_public_routes, ServiceState};
use testready::{metrics, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    // Console logging; level via RUST_LOG
    tracing_subscriber::fmt::init();

    metrics::register_metrics().expect("Failed to register metrics");
    info!("Metrics registered at /metrics");

    info!("Starting Test Readiness Analyzer server...");

    // Load configuration from environment
    let server_config = ServerConfig::from_env();
    server_config.log();

    let state = Arc::new(ServiceState::new(server_config.clone()));

    // Configure rate limiting from config
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(server_config.rate_limit_per_second)
        .burst_size(server_config.rate_limit_burst)
        .finish()
        .expect("Failed to build governor rate limiter configuration");

    let governor_layer = GovernorLayer {
        config: Arc::new(governor_conf),
    };

    info!(
        "Rate limiting enabled: {} req/sec, burst of {}",
        server_config.rate_limit_per_second, server_config.rate_limit_burst
    );

    // Build CORS layer from configuration
    let cors = server_config.cors.to_layer();

    // API routes are rate-limited; public routes (health, metrics, discovery)
    // must always be accessible for monitoring and Kubernetes probes
    let api_routes = build_api_routes(state.clone()).layer(governor_layer);
    let public_routes = build_public_routes(state);

    let max_concurrent = server_config.max_concurrent_requests;
    info!("Concurrency limiting enabled: max_concurrent={max_concurrent}");

    let app = axum::Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(axum::middleware::from_fn(middleware::track_metrics))
        .layer(ConcurrencyLimitLayer::new(max_concurrent))
        .layer(cors);

    let addr = format!("{}:{}", server_config.host, server_config.port);
    info!("Server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Rate limiter keys on peer IP, so serve with connect info
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Handle graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
