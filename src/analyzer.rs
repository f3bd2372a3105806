//! Readiness aggregation
//!
//! Runs the statistical, hypothesis, and design analyses over a validated
//! proposal and folds them into a single verdict with prioritized
//! recommendations. Pure computation over the proposal; no shared state,
//! so concurrent analyses never interact.

use tracing::{debug, info};

use crate::design;
use crate::errors::Result;
use crate::hypothesis;
use crate::models::{
    AnalysisResult, DesignAnalysis, HypothesisScore, ReadinessStatus, StatisticalAnalysis,
    TestProposal,
};
use crate::statistical;

/// Minimum hypothesis score for a READY verdict
pub const READY_SCORE_THRESHOLD: f64 = 7.0;

/// Maximum duration in days for a READY verdict
pub const READY_DURATION_DAYS: u64 = 30;

/// Minimum hypothesis score for a NEEDS_WORK verdict
pub const NEEDS_WORK_SCORE_THRESHOLD: f64 = 5.0;

/// Maximum duration in days for a NEEDS_WORK verdict
pub const NEEDS_WORK_DURATION_DAYS: u64 = 60;

/// Number of design recommendations surfaced in the overall list
const TOP_DESIGN_RECOMMENDATIONS: usize = 3;

/// Fold hypothesis score, duration, and design flaws into a verdict.
/// A critical design warning blocks both READY and NEEDS_WORK.
pub fn determine_status(
    hypothesis_score: f64,
    duration_days: u64,
    design_analysis: &DesignAnalysis,
) -> ReadinessStatus {
    let has_critical = design_analysis.has_critical_warning();

    if hypothesis_score >= READY_SCORE_THRESHOLD
        && duration_days <= READY_DURATION_DAYS
        && !has_critical
    {
        ReadinessStatus::Ready
    } else if hypothesis_score >= NEEDS_WORK_SCORE_THRESHOLD
        && duration_days <= NEEDS_WORK_DURATION_DAYS
        && !has_critical
    {
        ReadinessStatus::NeedsWork
    } else {
        ReadinessStatus::NotReady
    }
}

/// Build the prioritized overall recommendation list: status banner,
/// duration and hypothesis prompts when applicable, then the top design
/// recommendations verbatim.
pub fn build_overall_recommendations(
    status: ReadinessStatus,
    statistical_analysis: &StatisticalAnalysis,
    hypothesis_analysis: &HypothesisScore,
    design_analysis: &DesignAnalysis,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    recommendations.push(
        match status {
            ReadinessStatus::Ready => "Test is ready to launch! All criteria met.",
            ReadinessStatus::NeedsWork => "Test needs some improvements before launch.",
            ReadinessStatus::NotReady => {
                "Test is not ready. Address critical issues before proceeding."
            }
        }
        .to_string(),
    );

    if statistical_analysis.estimated_duration_days > READY_DURATION_DAYS {
        recommendations.push(format!(
            "Consider reducing test duration from {} days by increasing traffic or \
             reducing MDE.",
            statistical_analysis.estimated_duration_days
        ));
    }

    if hypothesis_analysis.overall_score < READY_SCORE_THRESHOLD {
        recommendations.push(format!(
            "Improve hypothesis quality (current score: {:.1}/10). See detailed \
             feedback for specific improvements.",
            hypothesis_analysis.overall_score
        ));
    }

    recommendations.extend(
        design_analysis
            .recommendations
            .iter()
            .take(TOP_DESIGN_RECOMMENDATIONS)
            .cloned(),
    );

    recommendations
}

/// Run the full analysis pipeline over an already-validated proposal.
pub fn analyze(proposal: &TestProposal) -> Result<AnalysisResult> {
    debug!(
        variations = proposal.number_of_variations,
        daily_traffic = proposal.daily_traffic,
        "Running readiness analysis"
    );

    let statistical_analysis = statistical::analyze(proposal)?;
    let hypothesis_analysis = hypothesis::score(proposal);
    let design_analysis = design::validate(proposal, statistical_analysis.required_sample_size);

    let readiness_status = determine_status(
        hypothesis_analysis.overall_score,
        statistical_analysis.estimated_duration_days,
        &design_analysis,
    );

    let overall_recommendations = build_overall_recommendations(
        readiness_status,
        &statistical_analysis,
        &hypothesis_analysis,
        &design_analysis,
    );

    info!(
        status = %readiness_status,
        sample_size = statistical_analysis.required_sample_size,
        duration_days = statistical_analysis.estimated_duration_days,
        hypothesis_score = hypothesis_analysis.overall_score,
        "Analysis complete"
    );

    Ok(AnalysisResult {
        readiness_status,
        statistical_analysis,
        hypothesis_analysis,
        design_analysis,
        overall_recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_design() -> DesignAnalysis {
        DesignAnalysis {
            variation_count_warning: None,
            traffic_allocation_warning: None,
            metric_warnings: Vec::new(),
            recommendations: vec![
                "First design recommendation".to_string(),
                "Second design recommendation".to_string(),
                "Third design recommendation".to_string(),
                "Fourth design recommendation".to_string(),
            ],
        }
    }

    fn flawed_design() -> DesignAnalysis {
        DesignAnalysis {
            variation_count_warning: Some("Too many variations".to_string()),
            ..clean_design()
        }
    }

    fn proposal() -> TestProposal {
        TestProposal {
            hypothesis: "We believe that changing the checkout button color will increase \
                         conversion rate because users are confused by the current color, \
                         based on user feedback"
                .to_string(),
            baseline_conversion_rate: 0.10,
            minimum_detectable_effect: 0.02,
            daily_traffic: 1000,
            number_of_variations: 2,
            primary_metric: "conversion rate".to_string(),
            secondary_metrics: None,
            test_start_date: None,
        }
    }

    #[test]
    fn test_status_thresholds() {
        let design = clean_design();
        assert_eq!(determine_status(7.0, 30, &design), ReadinessStatus::Ready);
        assert_eq!(
            determine_status(6.9, 30, &design),
            ReadinessStatus::NeedsWork
        );
        assert_eq!(
            determine_status(7.0, 31, &design),
            ReadinessStatus::NeedsWork
        );
        assert_eq!(determine_status(5.0, 60, &design), ReadinessStatus::NeedsWork);
        assert_eq!(
            determine_status(4.9, 60, &design),
            ReadinessStatus::NotReady
        );
        assert_eq!(
            determine_status(5.0, 61, &design),
            ReadinessStatus::NotReady
        );
    }

    #[test]
    fn test_critical_warning_blocks_ready_and_needs_work() {
        let design = flawed_design();
        assert_eq!(
            determine_status(10.0, 1, &design),
            ReadinessStatus::NotReady
        );
        assert_eq!(determine_status(6.0, 40, &design), ReadinessStatus::NotReady);
    }

    #[test]
    fn test_overall_recommendations_ready_case() {
        // Reference proposal: 8 days, score 8.0, no design flaws
        let result = analyze(&proposal()).unwrap();
        assert_eq!(result.readiness_status, ReadinessStatus::Ready);

        let recs = &result.overall_recommendations;
        assert_eq!(recs[0], "Test is ready to launch! All criteria met.");
        // No duration or hypothesis prompts, so banner + top 3 design recs
        assert_eq!(recs.len(), 1 + 3);
        assert_eq!(recs[1..], result.design_analysis.recommendations[..3]);
    }

    #[test]
    fn test_overall_recommendations_cite_duration_and_score() {
        let mut stats = StatisticalAnalysis {
            required_sample_size: 3843,
            estimated_duration_days: 45,
            samples_per_day_needed: 171,
            confidence_level: 0.95,
            statistical_power: 0.80,
            warnings: Vec::new(),
        };
        let hypothesis = HypothesisScore {
            overall_score: 5.5,
            specificity_score: 1.5,
            measurability_score: 1.5,
            directionality_score: 2.5,
            rationale_score: 0.0,
            feedback: Vec::new(),
            improved_hypothesis: None,
        };
        let design = clean_design();

        let recs = build_overall_recommendations(
            ReadinessStatus::NeedsWork,
            &stats,
            &hypothesis,
            &design,
        );
        assert_eq!(recs[0], "Test needs some improvements before launch.");
        assert!(recs[1].contains("from 45 days"));
        assert!(recs[2].contains("current score: 5.5/10"));
        assert_eq!(recs[3..], design.recommendations[..3]);

        // Prompts drop out when thresholds are met
        stats.estimated_duration_days = 20;
        let recs = build_overall_recommendations(
            ReadinessStatus::NeedsWork,
            &stats,
            &hypothesis,
            &design,
        );
        assert!(!recs.iter().any(|r| r.contains("reducing test duration")));
    }

    #[test]
    fn test_score_formatting_one_decimal() {
        let stats = StatisticalAnalysis {
            required_sample_size: 100,
            estimated_duration_days: 1,
            samples_per_day_needed: 100,
            confidence_level: 0.95,
            statistical_power: 0.80,
            warnings: Vec::new(),
        };
        let hypothesis = HypothesisScore {
            overall_score: 6.0,
            specificity_score: 1.0,
            measurability_score: 1.0,
            directionality_score: 2.0,
            rationale_score: 2.0,
            feedback: Vec::new(),
            improved_hypothesis: None,
        };
        let recs = build_overall_recommendations(
            ReadinessStatus::NeedsWork,
            &stats,
            &hypothesis,
            &clean_design(),
        );
        assert!(recs.iter().any(|r| r.contains("current score: 6.0/10")));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let p = proposal();
        let first = serde_json::to_value(analyze(&p).unwrap()).unwrap();
        let second = serde_json::to_value(analyze(&p).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_never_ready_with_critical_warning() {
        // 5 variations triggers the critical variation-count warning even
        // with a strong hypothesis and short duration
        let mut p = proposal();
        p.number_of_variations = 5;
        p.daily_traffic = 100_000;
        let result = analyze(&p).unwrap();
        assert!(result.design_analysis.has_critical_warning());
        assert_eq!(result.readiness_status, ReadinessStatus::NotReady);
    }
}
