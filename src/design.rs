//! Test design validation
//!
//! Checks the structural soundness of a proposed test: variation count,
//! traffic allocation against the required sample size, and metric
//! selection. Produces warnings plus a deterministic, ordered
//! recommendation list.

use crate::models::{DesignAnalysis, TestProposal};

/// Minimum daily visitors per variation for reliable results
pub const MIN_DAILY_TRAFFIC_PER_VARIATION: u64 = 100;

/// Traffic feasibility is judged against a 30-day test window
pub const TRAFFIC_WINDOW_DAYS: u64 = 30;

/// Secondary metric count above which multiple-comparison issues arise
pub const MAX_SECONDARY_METRICS_BEFORE_WARNING: usize = 5;

/// Metrics with high variance that need larger samples or closer monitoring.
/// Matched by substring against the lower-cased metric name.
const HIGH_VARIANCE_METRICS: &[&str] = &[
    "revenue",
    "average order value",
    "aov",
    "lifetime value",
    "ltv",
    "time on site",
    "session duration",
    "bounce rate",
];

fn is_high_variance(metric_lower: &str) -> bool {
    HIGH_VARIANCE_METRICS
        .iter()
        .any(|candidate| metric_lower.contains(candidate))
}

/// Warn when the variation count is outside the workable 2-4 range.
pub fn validate_variation_count(number_of_variations: u64) -> Option<String> {
    if number_of_variations > 4 {
        Some(format!(
            "Testing {number_of_variations} variations may dilute traffic and reduce \
             statistical power. Consider reducing to 2-3 variations for better results."
        ))
    } else if number_of_variations == 1 {
        Some(
            "Only 1 variation specified. Ensure you have a proper control group and \
             treatment group for valid comparison."
                .to_string(),
        )
    } else {
        None
    }
}

/// Warn when daily traffic cannot support the test. The insufficient-total
/// check wins over the per-variation check; at most one warning is returned.
pub fn validate_traffic_allocation(
    number_of_variations: u64,
    daily_traffic: u64,
    required_sample_size: u64,
) -> Option<String> {
    // Saturate: a tiny MDE can push the sample size to u64::MAX
    let total_samples_needed = required_sample_size.saturating_mul(number_of_variations);

    if total_samples_needed > daily_traffic.saturating_mul(TRAFFIC_WINDOW_DAYS) {
        return Some(format!(
            "Insufficient traffic for {number_of_variations} variations. Need \
             {total_samples_needed} total samples but only have {daily_traffic} daily \
             traffic. Consider reducing variations or increasing traffic."
        ));
    }

    let traffic_per_variation = daily_traffic / number_of_variations;
    if traffic_per_variation < MIN_DAILY_TRAFFIC_PER_VARIATION {
        return Some(format!(
            "Traffic per variation ({traffic_per_variation}) may be too low for reliable \
             results. Consider reducing variations or increasing traffic."
        ));
    }

    None
}

/// Collect metric-selection warnings: high-variance primary, raw click
/// counts, high-variance secondaries, and too many secondaries.
pub fn validate_metrics(
    primary_metric: &str,
    secondary_metrics: Option<&[String]>,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let primary_lower = primary_metric.to_lowercase();

    if is_high_variance(&primary_lower) {
        warnings.push(format!(
            "Primary metric '{primary_metric}' has high variance. Consider increasing \
             sample size or using a more stable metric."
        ));
    }

    if primary_lower.contains("click") && !primary_lower.contains("rate") {
        warnings.push(
            "Consider using click-through rate instead of raw click counts for more \
             meaningful comparison."
                .to_string(),
        );
    }

    if let Some(secondaries) = secondary_metrics {
        for metric in secondaries {
            if is_high_variance(&metric.to_lowercase()) {
                warnings.push(format!(
                    "Secondary metric '{metric}' has high variance. Monitor closely and \
                     consider statistical significance carefully."
                ));
            }
        }

        if secondaries.len() > MAX_SECONDARY_METRICS_BEFORE_WARNING {
            warnings.push(format!(
                "Tracking {} secondary metrics may lead to multiple comparison issues. \
                 Focus on 2-3 key metrics.",
                secondaries.len()
            ));
        }
    }

    warnings
}

/// Build the recommendation list. Order is fixed: variation fixes, traffic
/// fixes, metric fixes, parameter advice, then four general best practices.
fn generate_recommendations(
    proposal: &TestProposal,
    variation_warning: Option<&str>,
    traffic_warning: Option<&str>,
    metric_warnings: &[String],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if variation_warning.is_some() {
        if proposal.number_of_variations > 4 {
            recommendations.push(format!(
                "Reduce variations from {} to 2-3 for better statistical power and \
                 faster results.",
                proposal.number_of_variations
            ));
        } else if proposal.number_of_variations == 1 {
            recommendations.push(
                "Ensure you have both a control and treatment group. Single variation \
                 tests are not recommended."
                    .to_string(),
            );
        }
    }

    if let Some(warning) = traffic_warning {
        if warning.contains("Insufficient traffic") {
            recommendations.push(
                "Consider running a smaller test first or increasing traffic through \
                 marketing channels before launching the full test."
                    .to_string(),
            );
        } else if warning.contains("Traffic per variation") {
            recommendations.push(
                "Increase daily traffic or reduce the number of variations to ensure \
                 adequate sample size per variation."
                    .to_string(),
            );
        }
    }

    if !metric_warnings.is_empty() {
        if metric_warnings.iter().any(|w| w.contains("high variance")) {
            recommendations.push(
                "Consider using more stable metrics like conversion rates instead of \
                 revenue-based metrics for initial testing."
                    .to_string(),
            );
        }

        let secondary_count = proposal
            .secondary_metrics
            .as_ref()
            .map_or(0, |metrics| metrics.len());
        if secondary_count > MAX_SECONDARY_METRICS_BEFORE_WARNING {
            recommendations.push(
                "Focus on 2-3 key secondary metrics to avoid multiple comparison issues \
                 and maintain statistical rigor."
                    .to_string(),
            );
        }
    }

    if proposal.minimum_detectable_effect < 0.05 {
        recommendations.push(
            "Small MDE detected. Consider if this level of change is practically \
             significant for your business goals."
                .to_string(),
        );
    }

    if proposal.baseline_conversion_rate < 0.02 {
        recommendations.push(
            "Low baseline conversion rate. Ensure the metric is appropriate for your \
             traffic volume and consider using a more common metric."
                .to_string(),
        );
    }

    recommendations.extend(
        [
            "Ensure proper randomization and avoid selection bias in traffic allocation.",
            "Set up proper tracking and analytics before test launch.",
            "Define success criteria and stopping rules before starting the test.",
            "Plan for post-test analysis and implementation of winning variations.",
        ]
        .into_iter()
        .map(String::from),
    );

    recommendations
}

/// Run all design checks against a proposal and the computed sample size.
pub fn validate(proposal: &TestProposal, required_sample_size: u64) -> DesignAnalysis {
    let variation_count_warning = validate_variation_count(proposal.number_of_variations);
    let traffic_allocation_warning = validate_traffic_allocation(
        proposal.number_of_variations,
        proposal.daily_traffic,
        required_sample_size,
    );
    let metric_warnings = validate_metrics(
        &proposal.primary_metric,
        proposal.secondary_metrics.as_deref(),
    );

    let recommendations = generate_recommendations(
        proposal,
        variation_count_warning.as_deref(),
        traffic_allocation_warning.as_deref(),
        &metric_warnings,
    );

    DesignAnalysis {
        variation_count_warning,
        traffic_allocation_warning,
        metric_warnings,
        recommendations,
    }
}
