//! API Request/Response Types
//!
//! HTTP-facing structures for the analyzer server. The analysis domain
//! types live in `crate::models`; these cover the infrastructure and
//! discovery surfaces.

use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH & INFRASTRUCTURE
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// TOOL DISCOVERY
// =============================================================================

/// Discovery manifest listing the callable functions of this service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryManifest {
    pub functions: Vec<FunctionSpec>,
}

/// One callable function in the discovery manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
    pub endpoint: String,
    pub http_method: String,
    pub auth_requirements: Vec<String>,
}

/// Parameter schema entry for a discovered function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub description: String,
    pub required: bool,
}
