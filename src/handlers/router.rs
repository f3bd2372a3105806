//! Router Configuration - Centralized route definitions
//!
//! This module builds the Axum router using handlers from the submodules.
//! Routes are split into public (probes, metrics, discovery) and API
//! (the analysis operation, which the caller may rate-limit).

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::{analyze, discovery, health};
use crate::config::ServerConfig;

/// Shared service state. The analysis pipeline itself is stateless; this
/// carries configuration and process metadata for the health endpoints.
#[derive(Debug)]
pub struct ServiceState {
    pub config: ServerConfig,
    pub started_at: DateTime<Utc>,
}

impl ServiceState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            started_at: Utc::now(),
        }
    }
}

/// Application state type alias
pub type AppState = Arc<ServiceState>;

/// Build the public routes (never rate-limited)
///
/// These routes must always be accessible for:
/// - Health checks (Kubernetes probes)
/// - Metrics (Prometheus scraping)
/// - Tool discovery (external registration polls)
pub fn build_public_routes(state: AppState) -> Router {
    Router::new()
        // =================================================================
        // HEALTH & KUBERNETES PROBES
        // =================================================================
        .route("/health", get(health::health))
        .route("/health/live", get(health::health_live))
        .route("/health/ready", get(health::health_ready))
        // =================================================================
        // METRICS (PROMETHEUS)
        // =================================================================
        .route("/metrics", get(health::metrics_endpoint))
        // =================================================================
        // TOOL DISCOVERY
        // =================================================================
        .route("/discovery", get(discovery::discovery))
        // =================================================================
        // STATE
        // =================================================================
        .with_state(state)
}

/// Build the API routes (rate-limited by the caller)
pub fn build_api_routes(state: AppState) -> Router {
    Router::new()
        // =================================================================
        // ANALYSIS
        // =================================================================
        .route("/analyze", post(analyze::analyze_proposal))
        // =================================================================
        // STATE
        // =================================================================
        .with_state(state)
}

/// Build the complete router with both public and API routes
///
/// Note: This function does NOT apply rate limiting or other layers.
/// The caller (main.rs) should apply those as needed.
pub fn build_router(state: AppState) -> Router {
    let public = build_public_routes(state.clone());
    let api = build_api_routes(state);

    Router::new().merge(public).merge(api)
}
