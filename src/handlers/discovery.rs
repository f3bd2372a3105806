//! Tool Discovery Handler
//!
//! Serves the static manifest that external tool registries poll to learn
//! the analyze operation's parameter schema.

use axum::response::Json;
use tracing::debug;

use super::types::{DiscoveryManifest, FunctionSpec, ParameterSpec};

fn parameter(name: &str, param_type: &str, description: &str, required: bool) -> ParameterSpec {
    ParameterSpec {
        name: name.to_string(),
        param_type: param_type.to_string(),
        description: description.to_string(),
        required,
    }
}

/// Build the discovery manifest describing the analyze operation.
pub fn build_manifest() -> DiscoveryManifest {
    DiscoveryManifest {
        functions: vec![FunctionSpec {
            name: "test_readiness_analyzer".to_string(),
            description: "Analyzes A/B test proposals for statistical validity, hypothesis \
                          quality, and design best practices. Use this when a user wants to \
                          evaluate if their experiment is ready to launch."
                .to_string(),
            parameters: vec![
                parameter(
                    "hypothesis",
                    "string",
                    "The test hypothesis describing what you want to test and why",
                    true,
                ),
                parameter(
                    "baseline_conversion_rate",
                    "number",
                    "Current baseline conversion rate (0-1)",
                    true,
                ),
                parameter(
                    "minimum_detectable_effect",
                    "number",
                    "Minimum detectable effect you want to measure (0-1)",
                    true,
                ),
                parameter(
                    "daily_traffic",
                    "integer",
                    "Daily traffic volume for the test",
                    true,
                ),
                parameter(
                    "number_of_variations",
                    "integer",
                    "Number of test variations (including control)",
                    false,
                ),
                parameter(
                    "primary_metric",
                    "string",
                    "Primary success metric for the test",
                    true,
                ),
                parameter(
                    "secondary_metrics",
                    "array",
                    "Additional metrics to track during the test",
                    false,
                ),
                parameter(
                    "test_start_date",
                    "string",
                    "Planned test start date (ISO format)",
                    false,
                ),
            ],
            endpoint: "/analyze".to_string(),
            http_method: "POST".to_string(),
            auth_requirements: Vec::new(),
        }],
    }
}

/// Tool discovery endpoint
pub async fn discovery() -> Json<DiscoveryManifest> {
    debug!("Discovery endpoint requested");
    Json(build_manifest())
}
