//! Domain value objects for proposal analysis
//!
//! All types here are immutable once constructed and serialize directly to
//! the HTTP API payloads. A result lives exactly one request/response cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final categorical verdict for a test proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessStatus {
    Ready,
    NeedsWork,
    NotReady,
}

impl std::fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready => write!(f, "READY"),
            Self::NeedsWork => write!(f, "NEEDS_WORK"),
            Self::NotReady => write!(f, "NOT_READY"),
        }
    }
}

/// Input model for test proposal analysis.
///
/// Deserialized from the `/analyze` request body. Field constraints are
/// enforced by [`crate::validation::validate_proposal`] before any analysis
/// runs; handlers must call it on every inbound proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestProposal {
    /// The test hypothesis (min 10 chars, stored trimmed)
    pub hypothesis: String,

    /// Baseline conversion rate, 0-1
    pub baseline_conversion_rate: f64,

    /// Minimum detectable effect, 0-1
    pub minimum_detectable_effect: f64,

    /// Daily traffic volume
    pub daily_traffic: u64,

    /// Number of test variations (including control)
    #[serde(default = "default_variations")]
    pub number_of_variations: u64,

    /// Primary success metric
    pub primary_metric: String,

    /// Secondary metrics to track (deduplicated, trimmed; omitted if empty)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_metrics: Option<Vec<String>>,

    /// Planned test start date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_start_date: Option<DateTime<Utc>>,
}

fn default_variations() -> u64 {
    1
}

/// Statistical analysis results: sample size, duration, and warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalAnalysis {
    /// Required sample size per variation (floor: 100)
    pub required_sample_size: u64,

    /// Estimated test duration in days (floor: 1)
    pub estimated_duration_days: u64,

    /// Samples needed per day to finish on schedule
    pub samples_per_day_needed: u64,

    /// Statistical confidence level (fixed at 0.95)
    pub confidence_level: f64,

    /// Statistical power (fixed at 0.80)
    pub statistical_power: f64,

    /// Statistical warnings, in fixed evaluation order
    pub warnings: Vec<String>,
}

/// Hypothesis quality scoring results.
///
/// Each sub-score is capped at 2.5, so `overall_score` tops out at exactly
/// 10.0 with no additional clamp at the sum level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisScore {
    /// Overall hypothesis score, 0-10
    pub overall_score: f64,

    /// Specificity score, 0-2.5
    pub specificity_score: f64,

    /// Measurability score, 0-2.5
    pub measurability_score: f64,

    /// Directionality score, 0-2.5
    pub directionality_score: f64,

    /// Rationale score, 0-2.5
    pub rationale_score: f64,

    /// Per-dimension feedback lines (✓ found / ✗ missing / ⚠ flagged)
    pub feedback: Vec<String>,

    /// Suggested improvements, or a generic note when none apply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improved_hypothesis: Option<String>,
}

/// Test design validation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignAnalysis {
    /// Warning about the variation count, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_count_warning: Option<String>,

    /// Warning about traffic allocation, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_allocation_warning: Option<String>,

    /// Metric-specific warnings (no dedup, source order)
    pub metric_warnings: Vec<String>,

    /// Design recommendations in deterministic order
    pub recommendations: Vec<String>,
}

impl DesignAnalysis {
    /// Variation-count and traffic warnings gate the readiness verdict;
    /// metric warnings do not.
    pub fn has_critical_warning(&self) -> bool {
        self.variation_count_warning.is_some() || self.traffic_allocation_warning.is_some()
    }
}

/// Combined analysis result - the sole output entity of the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall readiness verdict
    pub readiness_status: ReadinessStatus,

    /// Statistical analysis results
    pub statistical_analysis: StatisticalAnalysis,

    /// Hypothesis scoring results
    pub hypothesis_analysis: HypothesisScore,

    /// Design validation results
    pub design_analysis: DesignAnalysis,

    /// Prioritized overall recommendations
    pub overall_recommendations: Vec<String>,
}
