//! Hypothesis quality scoring
//!
//! Evaluates hypothesis text across four dimensions (specificity,
//! measurability, directionality, rationale) using fixed keyword tables and
//! plain substring containment on the lower-cased text. No tokenization,
//! stemming, or negation handling - a known limitation of the heuristic,
//! not a bug.
//!
//! Keyword tables are named consts so they can be tested and swapped without
//! touching the scoring logic.

use crate::models::{HypothesisScore, TestProposal};

/// Per-dimension score cap
pub const DIMENSION_CAP: f64 = 2.5;

// =============================================================================
// KEYWORD TABLES
// =============================================================================

/// UI elements that make a hypothesis concrete about what is changing
const UI_ELEMENTS: &[&str] = &[
    "button",
    "form",
    "header",
    "footer",
    "navigation",
    "menu",
    "link",
    "image",
    "text",
    "title",
    "subtitle",
    "call-to-action",
    "cta",
    "checkout",
    "cart",
    "product",
    "pricing",
    "signup",
    "login",
];

/// User actions the change is expected to affect
const ACTION_WORDS: &[&str] = &[
    "click",
    "submit",
    "purchase",
    "sign up",
    "register",
    "download",
    "subscribe",
    "complete",
    "finish",
    "proceed",
    "continue",
];

/// Outcome metrics named in the hypothesis
const METRIC_WORDS: &[&str] = &[
    "conversion",
    "click-through",
    "engagement",
    "time",
    "revenue",
    "signups",
    "purchases",
    "downloads",
    "registrations",
];

/// Quantitative metric vocabulary
const QUANTITATIVE_METRICS: &[&str] = &[
    "rate",
    "percentage",
    "%",
    "ratio",
    "count",
    "number",
    "total",
    "average",
    "mean",
    "median",
    "conversion rate",
    "click rate",
    "engagement rate",
    "bounce rate",
    "completion rate",
];

/// Measurement tools and methods
const MEASUREMENT_TERMS: &[&str] = &[
    "track",
    "measure",
    "analytics",
    "data",
    "metric",
    "kpi",
    "conversion tracking",
    "event tracking",
    "funnel",
];

/// Positive outcome predictions
const POSITIVE_DIRECTION: &[&str] = &[
    "increase",
    "improve",
    "boost",
    "enhance",
    "raise",
    "lift",
    "higher",
    "more",
    "better",
    "faster",
    "easier",
];

/// Negative outcome predictions
const NEGATIVE_DIRECTION: &[&str] = &[
    "decrease",
    "reduce",
    "lower",
    "less",
    "fewer",
    "minimize",
];

/// Causal connectives signalling reasoning
const REASONING_WORDS: &[&str] = &[
    "because",
    "since",
    "due to",
    "as a result",
    "therefore",
    "given that",
    "considering",
    "based on",
    "according to",
];

/// Supporting evidence references
const EVIDENCE_WORDS: &[&str] = &[
    "data",
    "research",
    "study",
    "analysis",
    "findings",
    "results",
    "evidence",
    "insights",
    "observations",
    "feedback",
    "user behavior",
];

/// Generic adjectives that weaken a hypothesis
const VAGUE_WORDS: &[&str] = &[
    "improve",
    "better",
    "optimize",
    "enhance",
    "good",
    "bad",
    "nice",
    "great",
    "awesome",
    "terrible",
    "amazing",
    "wonderful",
];

// =============================================================================
// DIMENSION SCORING
// =============================================================================

/// Hypothesis elements the scorer can flag as missing. Each maps to one
/// targeted improvement suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingElement {
    UiElement,
    UserAction,
    QuantitativeMetric,
    Direction,
    Reasoning,
}

impl MissingElement {
    fn suggestion(self) -> &'static str {
        match self {
            Self::UiElement => {
                "Specify which UI element you're testing (e.g., 'checkout button', 'signup form')"
            }
            Self::UserAction => {
                "Specify the user action you expect to change (e.g., 'click rate', 'completion rate')"
            }
            Self::QuantitativeMetric => {
                "Include specific metrics (e.g., 'conversion rate', 'click-through rate')"
            }
            Self::Direction => "State whether you expect an increase or decrease in the metric",
            Self::Reasoning => "Add reasoning with 'because' to explain why you expect this change",
        }
    }
}

/// Score and feedback for one scoring dimension, with explicit flags for
/// elements the improvement generator should address. An explicit struct
/// rather than a tuple keeps the four dimensions uniformly composable.
#[derive(Debug, Clone)]
pub struct DimensionScore {
    pub score: f64,
    pub feedback: Vec<String>,
    pub missing: Vec<MissingElement>,
}

/// Count how many table entries occur in the (already lower-cased) text.
fn count_matches(lower: &str, table: &[&str]) -> usize {
    table.iter().filter(|term| lower.contains(*term)).count()
}

/// Specificity: does the hypothesis identify what is changing?
fn check_specificity(lower: &str) -> DimensionScore {
    let mut score: f64 = 0.0;
    let mut feedback = Vec::new();
    let mut missing = Vec::new();

    let ui_found = count_matches(lower, UI_ELEMENTS);
    if ui_found > 0 {
        score += 1.0;
        feedback.push(format!("✓ Identifies specific UI elements ({ui_found} found)"));
    } else {
        feedback.push("✗ No specific UI elements mentioned".to_string());
        missing.push(MissingElement::UiElement);
    }

    let actions_found = count_matches(lower, ACTION_WORDS);
    if actions_found > 0 {
        score += 1.0;
        feedback.push(format!(
            "✓ Identifies specific user actions ({actions_found} found)"
        ));
    } else {
        feedback.push("✗ No specific user actions mentioned".to_string());
        missing.push(MissingElement::UserAction);
    }

    let metrics_found = count_matches(lower, METRIC_WORDS);
    if metrics_found > 0 {
        score += 0.5;
        feedback.push(format!("✓ Mentions specific metrics ({metrics_found} found)"));
    } else {
        feedback.push("✗ No specific metrics mentioned".to_string());
    }

    DimensionScore {
        score: score.min(DIMENSION_CAP),
        feedback,
        missing,
    }
}

/// Measurability: does the hypothesis name clear, quantifiable metrics?
fn check_measurability(lower: &str) -> DimensionScore {
    let mut score: f64 = 0.0;
    let mut feedback = Vec::new();
    let mut missing = Vec::new();

    let quant_found = count_matches(lower, QUANTITATIVE_METRICS);
    if quant_found > 0 {
        score += 1.5;
        feedback.push(format!("✓ Uses quantitative metrics ({quant_found} found)"));
    } else {
        feedback.push("✗ No quantitative metrics mentioned".to_string());
        missing.push(MissingElement::QuantitativeMetric);
    }

    let measurement_found = count_matches(lower, MEASUREMENT_TERMS);
    if measurement_found > 0 {
        score += 1.0;
        feedback.push(format!(
            "✓ Mentions measurement approach ({measurement_found} found)"
        ));
    } else {
        feedback.push("✗ No measurement approach mentioned".to_string());
    }

    DimensionScore {
        score: score.min(DIMENSION_CAP),
        feedback,
        missing,
    }
}

/// Directionality: does the hypothesis predict which way the metric moves?
fn check_directionality(lower: &str) -> DimensionScore {
    let mut feedback = Vec::new();
    let mut missing = Vec::new();

    let pos_found = count_matches(lower, POSITIVE_DIRECTION);
    let neg_found = count_matches(lower, NEGATIVE_DIRECTION);

    let score: f64 = if pos_found > 0 && neg_found == 0 {
        feedback.push(format!("✓ Predicts positive outcome ({pos_found} indicators)"));
        2.5
    } else if neg_found > 0 && pos_found == 0 {
        feedback.push(format!("✓ Predicts negative outcome ({neg_found} indicators)"));
        2.5
    } else if pos_found > 0 && neg_found > 0 {
        feedback.push("⚠ Mixed directional predictions (may be confusing)".to_string());
        1.0
    } else {
        feedback.push("✗ No clear directional prediction".to_string());
        missing.push(MissingElement::Direction);
        0.0
    };

    DimensionScore {
        score: score.min(DIMENSION_CAP),
        feedback,
        missing,
    }
}

/// Rationale: does the hypothesis explain why the change should work?
fn check_rationale(lower: &str) -> DimensionScore {
    let mut score: f64 = 0.0;
    let mut feedback = Vec::new();
    let mut missing = Vec::new();

    let reasoning_found = count_matches(lower, REASONING_WORDS);
    if reasoning_found > 0 {
        score += 1.5;
        feedback.push(format!("✓ Contains reasoning ({reasoning_found} indicators)"));
    } else {
        feedback.push("✗ No clear reasoning provided".to_string());
        missing.push(MissingElement::Reasoning);
    }

    let evidence_found = count_matches(lower, EVIDENCE_WORDS);
    if evidence_found > 0 {
        score += 1.0;
        feedback.push(format!(
            "✓ References supporting evidence ({evidence_found} found)"
        ));
    } else {
        feedback.push("✗ No supporting evidence mentioned".to_string());
    }

    DimensionScore {
        score: score.min(DIMENSION_CAP),
        feedback,
        missing,
    }
}

/// List the vague adjectives present in the text, in table order.
pub fn detect_vague_language(lower: &str) -> Vec<&'static str> {
    VAGUE_WORDS
        .iter()
        .copied()
        .filter(|word| lower.contains(word))
        .collect()
}

/// Build the improvement suggestion text from the missing-element flags and
/// any vague words found, or a generic note when there is nothing to fix.
fn generate_improved_hypothesis(missing: &[MissingElement], vague_words: &[&str]) -> String {
    let mut improvements: Vec<String> = missing
        .iter()
        .map(|element| element.suggestion().to_string())
        .collect();

    if !vague_words.is_empty() {
        improvements.push(format!(
            "Replace vague words like '{}' with specific, measurable terms",
            vague_words.join(", ")
        ));
    }

    if improvements.is_empty() {
        return "Hypothesis is already well-structured. Consider adding more specific details \
                if possible."
            .to_string();
    }

    let bullets: Vec<String> = improvements.iter().map(|i| format!("• {i}")).collect();
    format!("Consider these improvements:\n{}", bullets.join("\n"))
}

/// Score hypothesis quality across all four dimensions.
pub fn score(proposal: &TestProposal) -> HypothesisScore {
    let lower = proposal.hypothesis.to_lowercase();

    let specificity = check_specificity(&lower);
    let measurability = check_measurability(&lower);
    let directionality = check_directionality(&lower);
    let rationale = check_rationale(&lower);

    // Each dimension caps at 2.5, so the sum tops out at exactly 10.0;
    // no clamp is applied here.
    let overall_score =
        specificity.score + measurability.score + directionality.score + rationale.score;

    let mut feedback = Vec::new();
    feedback.extend(specificity.feedback.iter().cloned());
    feedback.extend(measurability.feedback.iter().cloned());
    feedback.extend(directionality.feedback.iter().cloned());
    feedback.extend(rationale.feedback.iter().cloned());

    let vague_words = detect_vague_language(&lower);
    if !vague_words.is_empty() {
        feedback.push(format!(
            "⚠ Vague language detected: {}",
            vague_words.join(", ")
        ));
    }

    let mut missing = Vec::new();
    missing.extend(specificity.missing.iter().copied());
    missing.extend(measurability.missing.iter().copied());
    missing.extend(directionality.missing.iter().copied());
    missing.extend(rationale.missing.iter().copied());

    let improved_hypothesis = Some(generate_improved_hypothesis(&missing, &vague_words));

    HypothesisScore {
        overall_score,
        specificity_score: specificity.score,
        measurability_score: measurability.score,
        directionality_score: directionality.score,
        rationale_score: rationale.score,
        feedback,
        improved_hypothesis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal_with(hypothesis: &str) -> TestProposal {
        TestProposal {
            hypothesis: hypothesis.to_string(),
            baseline_conversion_rate: 0.1,
            minimum_detectable_effect: 0.02,
            daily_traffic: 1000,
            number_of_variations: 2,
            primary_metric: "conversion rate".to_string(),
            secondary_metrics: None,
            test_start_date: None,
        }
    }

    const REFERENCE_HYPOTHESIS: &str = "We believe that changing the checkout button color \
         will increase conversion rate because users are confused by the current color, \
         based on user feedback";

    #[test]
    fn test_reference_hypothesis_scoring() {
        let result = score(&proposal_with(REFERENCE_HYPOTHESIS));

        // UI elements ("button", "checkout") +1.0, no action +0,
        // metric ("conversion") +0.5
        assert_eq!(result.specificity_score, 1.5);
        // "rate" +1.5, no measurement term
        assert_eq!(result.measurability_score, 1.5);
        // "increase" only, no negative words
        assert_eq!(result.directionality_score, 2.5);
        // "because"/"based on" +1.5, "feedback" +1.0
        assert_eq!(result.rationale_score, 2.5);
        assert_eq!(result.overall_score, 8.0);

        // No vague words in the reference text
        assert!(!result
            .feedback
            .iter()
            .any(|f| f.contains("Vague language")));
    }

    #[test]
    fn test_empty_signal_hypothesis_scores_zero() {
        let result = score(&proposal_with("xyzzy plugh quux corge grault"));
        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.feedback.len(), 8); // one line per sub-check, all misses
        assert!(result.feedback.iter().all(|f| f.starts_with('✗')));
    }

    #[test]
    fn test_dimension_caps() {
        // Stacks every specificity trigger; still capped at 2.5
        let result = score(&proposal_with(
            "Users will click the checkout button on the signup form to purchase \
             and subscribe, raising conversion and engagement and revenue",
        ));
        assert!(result.specificity_score <= DIMENSION_CAP);
        assert!(result.overall_score <= 10.0);
    }

    #[test]
    fn test_mixed_direction_scores_one() {
        let result = score(&proposal_with(
            "The new layout will increase signups and decrease abandonment across the funnel",
        ));
        assert_eq!(result.directionality_score, 1.0);
        assert!(result
            .feedback
            .iter()
            .any(|f| f.contains("Mixed directional predictions")));
    }

    #[test]
    fn test_negative_direction_scores_full() {
        let result = score(&proposal_with(
            "Removing the coupon field will reduce cart abandonment measured via funnel analytics",
        ));
        assert_eq!(result.directionality_score, 2.5);
        assert!(result
            .feedback
            .iter()
            .any(|f| f.contains("Predicts negative outcome")));
    }

    #[test]
    fn test_vague_language_detected() {
        let lower = "we want to improve the page and make it better".to_lowercase();
        let vague = detect_vague_language(&lower);
        assert_eq!(vague, vec!["improve", "better"]);

        let result = score(&proposal_with("We want to improve the page and make it better"));
        assert!(result
            .feedback
            .iter()
            .any(|f| f.contains("Vague language detected: improve, better")));
    }

    #[test]
    fn test_improved_hypothesis_lists_missing_elements() {
        let result = score(&proposal_with("Something will happen somewhere eventually"));
        let improved = result.improved_hypothesis.unwrap();
        assert!(improved.starts_with("Consider these improvements:"));
        assert!(improved.contains("UI element"));
        assert!(improved.contains("user action"));
        assert!(improved.contains("specific metrics"));
        assert!(improved.contains("increase or decrease"));
        assert!(improved.contains("because"));
    }

    #[test]
    fn test_well_structured_hypothesis_gets_generic_note() {
        // Hits UI, action, metric, quantitative, direction, and reasoning
        // without any vague words ("increase" is directional, not vague)
        let result = score(&proposal_with(
            "Moving the checkout button above the fold will increase click rate \
             because analytics data shows users rarely scroll",
        ));
        let improved = result.improved_hypothesis.unwrap();
        assert!(improved.contains("already well-structured"));
    }

    #[test]
    fn test_substring_matching_has_no_word_boundaries() {
        // "informed" contains "form" - documented limitation of the heuristic
        let lower = "users stay informed".to_lowercase();
        assert_eq!(count_matches(&lower, UI_ELEMENTS), 1);
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(UI_ELEMENTS.len(), 19);
        assert_eq!(ACTION_WORDS.len(), 11);
        assert_eq!(METRIC_WORDS.len(), 9);
        assert_eq!(QUANTITATIVE_METRICS.len(), 15);
        assert_eq!(MEASUREMENT_TERMS.len(), 9);
        assert_eq!(POSITIVE_DIRECTION.len(), 11);
        assert_eq!(NEGATIVE_DIRECTION.len(), 6);
        assert_eq!(REASONING_WORDS.len(), 9);
        assert_eq!(EVIDENCE_WORDS.len(), 11);
        assert_eq!(VAGUE_WORDS.len(), 12);
    }
}
