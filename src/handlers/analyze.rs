//! Analysis Handler
//!
//! The core operation: validate a test proposal and run the full readiness
//! analysis pipeline.

use axum::response::Json;
use tracing::{info, warn};

use crate::analyzer;
use crate::errors::{Result, ValidationErrorExt};
use crate::metrics;
use crate::models::{AnalysisResult, TestProposal};
use crate::validation;

/// Analyze a test proposal for readiness
///
/// Validation failures surface as 400 INVALID_INPUT; computation failures
/// as 500 INTERNAL_ERROR.
pub async fn analyze_proposal(Json(proposal): Json<TestProposal>) -> Result<Json<AnalysisResult>> {
    let preview: String = proposal.hypothesis.chars().take(50).collect();
    info!("Analyzing test proposal: {preview}...");

    let proposal = validation::validate_proposal(&proposal)
        .map_err(|err| {
            warn!("Proposal rejected: {err}");
            metrics::VALIDATION_REJECTIONS
                .with_label_values(&["proposal"])
                .inc();
            err
        })
        .map_validation_err("proposal")?;

    let _timer = metrics::Timer::new(metrics::ANALYSIS_DURATION.clone());
    let result = analyzer::analyze(&proposal)?;

    metrics::ANALYSES_TOTAL
        .with_label_values(&[&result.readiness_status.to_string()])
        .inc();

    Ok(Json(result))
}
