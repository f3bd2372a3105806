//! HTTP API Handlers - Modular organization of the REST API
//!
//! Each submodule handles a specific domain of functionality.

// Core modules
pub mod router;
pub mod types;

// Health and infrastructure
pub mod health;

// Tool discovery
pub mod discovery;

// Analysis
pub mod analyze;

// Re-export commonly used items
pub use router::{build_api_routes, build_public_routes, build_router, AppState, ServiceState};
pub use types::*;
