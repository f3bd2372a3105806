//! Input validation for test proposals
//!
//! All field constraints live here so they are enforced before any analysis
//! runs. Handlers convert failures into field-tagged 400 responses via
//! `ValidationErrorExt`.

use anyhow::{anyhow, Result};

use crate::models::TestProposal;

/// Minimum hypothesis length after trimming
pub const MIN_HYPOTHESIS_LENGTH: usize = 10;
/// Maximum hypothesis length (sanity cap for free-text input)
pub const MAX_HYPOTHESIS_LENGTH: usize = 10_000;
/// Maximum metric name length
pub const MAX_METRIC_LENGTH: usize = 256;
/// Maximum number of secondary metrics accepted
pub const MAX_SECONDARY_METRICS: usize = 50;
/// Maximum daily traffic accepted (sanity cap; keeps downstream
/// sample-size arithmetic far from u64 range)
pub const MAX_DAILY_TRAFFIC: u64 = 1_000_000_000;
/// Maximum variation count accepted (sanity cap, same reason)
pub const MAX_VARIATIONS: u64 = 100;

/// Validate the hypothesis text
pub fn validate_hypothesis(hypothesis: &str) -> Result<()> {
    let trimmed = hypothesis.trim();

    if trimmed.is_empty() {
        return Err(anyhow!("hypothesis cannot be empty or just whitespace"));
    }

    if trimmed.len() < MIN_HYPOTHESIS_LENGTH {
        return Err(anyhow!(
            "hypothesis too short: {} chars (min: {})",
            trimmed.len(),
            MIN_HYPOTHESIS_LENGTH
        ));
    }

    if trimmed.len() > MAX_HYPOTHESIS_LENGTH {
        return Err(anyhow!(
            "hypothesis too long: {} chars (max: {})",
            trimmed.len(),
            MAX_HYPOTHESIS_LENGTH
        ));
    }

    Ok(())
}

/// Validate a rate-like value (baseline conversion rate, MDE)
pub fn validate_rate(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(anyhow!("{name} must be a finite number, got: {value}"));
    }

    if !(0.0..=1.0).contains(&value) {
        return Err(anyhow!("{name} must be between 0.0 and 1.0, got: {value}"));
    }

    Ok(())
}

/// Validate daily traffic volume
pub fn validate_daily_traffic(daily_traffic: u64) -> Result<()> {
    if daily_traffic == 0 {
        return Err(anyhow!("daily_traffic must be greater than 0"));
    }
    if daily_traffic > MAX_DAILY_TRAFFIC {
        return Err(anyhow!(
            "daily_traffic too large: {daily_traffic} (max: {MAX_DAILY_TRAFFIC})"
        ));
    }
    Ok(())
}

/// Validate variation count
pub fn validate_variations(number_of_variations: u64) -> Result<()> {
    if number_of_variations == 0 {
        return Err(anyhow!("number_of_variations must be at least 1"));
    }
    if number_of_variations > MAX_VARIATIONS {
        return Err(anyhow!(
            "number_of_variations too large: {number_of_variations} (max: {MAX_VARIATIONS})"
        ));
    }
    Ok(())
}

/// Validate a metric name
pub fn validate_metric(name: &str, metric: &str) -> Result<()> {
    if metric.trim().is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }

    if metric.len() > MAX_METRIC_LENGTH {
        return Err(anyhow!(
            "{name} too long: {} chars (max: {})",
            metric.len(),
            MAX_METRIC_LENGTH
        ));
    }

    Ok(())
}

/// Normalize an optional secondary metric list: trim entries, drop empties,
/// dedup preserving first-seen order. Returns `None` if nothing survives.
pub fn normalize_secondary_metrics(metrics: Option<Vec<String>>) -> Option<Vec<String>> {
    let metrics = metrics?;

    let mut seen = std::collections::HashSet::new();
    let cleaned: Vec<String> = metrics
        .into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .filter(|m| seen.insert(m.clone()))
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Validate every field of a proposal and return a normalized copy
/// (trimmed hypothesis, deduplicated secondary metrics).
///
/// Errors carry the offending field name in the message so the handler can
/// tag them; nothing downstream of this function sees an invalid proposal.
pub fn validate_proposal(proposal: &TestProposal) -> Result<TestProposal> {
    validate_hypothesis(&proposal.hypothesis).map_err(|e| anyhow!("hypothesis: {e}"))?;
    validate_rate("baseline_conversion_rate", proposal.baseline_conversion_rate)?;
    validate_rate(
        "minimum_detectable_effect",
        proposal.minimum_detectable_effect,
    )?;
    validate_daily_traffic(proposal.daily_traffic)?;
    validate_variations(proposal.number_of_variations)?;
    validate_metric("primary_metric", &proposal.primary_metric)?;

    if let Some(metrics) = &proposal.secondary_metrics {
        if metrics.len() > MAX_SECONDARY_METRICS {
            return Err(anyhow!(
                "too many secondary_metrics: {} (max: {})",
                metrics.len(),
                MAX_SECONDARY_METRICS
            ));
        }
        for metric in metrics.iter().filter(|m| !m.trim().is_empty()) {
            validate_metric("secondary_metrics entry", metric)?;
        }
    }

    Ok(TestProposal {
        hypothesis: proposal.hypothesis.trim().to_string(),
        secondary_metrics: normalize_secondary_metrics(proposal.secondary_metrics.clone()),
        ..proposal.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_proposal() -> TestProposal {
        TestProposal {
            hypothesis: "Changing the checkout button color will increase conversion rate"
                .to_string(),
            baseline_conversion_rate: 0.1,
            minimum_detectable_effect: 0.02,
            daily_traffic: 1000,
            number_of_variations: 2,
            primary_metric: "conversion rate".to_string(),
            secondary_metrics: None,
            test_start_date: None,
        }
    }

    #[test]
    fn test_valid_hypothesis() {
        assert!(validate_hypothesis("A proper hypothesis with enough detail").is_ok());
    }

    #[test]
    fn test_invalid_hypothesis() {
        assert!(validate_hypothesis("").is_err()); // empty
        assert!(validate_hypothesis("   \t  ").is_err()); // whitespace only
        assert!(validate_hypothesis("too short").is_err()); // under 10 chars
        assert!(validate_hypothesis(&"x".repeat(20_000)).is_err()); // too long
    }

    #[test]
    fn test_rate_bounds() {
        assert!(validate_rate("rate", 0.0).is_ok());
        assert!(validate_rate("rate", 0.5).is_ok());
        assert!(validate_rate("rate", 1.0).is_ok());
        assert!(validate_rate("rate", -0.1).is_err());
        assert!(validate_rate("rate", 1.1).is_err());
        assert!(validate_rate("rate", f64::NAN).is_err());
        assert!(validate_rate("rate", f64::INFINITY).is_err());
    }

    #[test]
    fn test_daily_traffic() {
        assert!(validate_daily_traffic(1).is_ok());
        assert!(validate_daily_traffic(MAX_DAILY_TRAFFIC).is_ok());
        assert!(validate_daily_traffic(0).is_err());
        assert!(validate_daily_traffic(MAX_DAILY_TRAFFIC + 1).is_err());
        assert!(validate_daily_traffic(u64::MAX).is_err());
    }

    #[test]
    fn test_variations() {
        assert!(validate_variations(1).is_ok());
        assert!(validate_variations(MAX_VARIATIONS).is_ok());
        assert!(validate_variations(0).is_err());
        assert!(validate_variations(MAX_VARIATIONS + 1).is_err());
        assert!(validate_variations(1 << 60).is_err());
    }

    #[test]
    fn test_validate_proposal_rejects_out_of_range_magnitudes() {
        let mut proposal = base_proposal();
        proposal.number_of_variations = 1 << 60;
        assert!(validate_proposal(&proposal).is_err());

        let mut proposal = base_proposal();
        proposal.daily_traffic = u64::MAX;
        assert!(validate_proposal(&proposal).is_err());
    }

    #[test]
    fn test_metric_name() {
        assert!(validate_metric("primary_metric", "conversion rate").is_ok());
        assert!(validate_metric("primary_metric", "").is_err());
        assert!(validate_metric("primary_metric", "  ").is_err());
        assert!(validate_metric("primary_metric", &"m".repeat(500)).is_err());
    }

    #[test]
    fn test_secondary_metric_normalization() {
        let input = Some(vec![
            " clicks ".to_string(),
            "clicks".to_string(),
            "".to_string(),
            "revenue".to_string(),
        ]);
        let normalized = normalize_secondary_metrics(input).unwrap();
        assert_eq!(normalized, vec!["clicks".to_string(), "revenue".to_string()]);

        // All-empty list collapses to None
        assert!(normalize_secondary_metrics(Some(vec!["  ".to_string()])).is_none());
        assert!(normalize_secondary_metrics(Some(vec![])).is_none());
        assert!(normalize_secondary_metrics(None).is_none());
    }

    #[test]
    fn test_validate_proposal_trims_hypothesis() {
        let mut proposal = base_proposal();
        proposal.hypothesis = format!("  {}  ", proposal.hypothesis);
        let validated = validate_proposal(&proposal).unwrap();
        assert!(!validated.hypothesis.starts_with(' '));
        assert!(!validated.hypothesis.ends_with(' '));
    }

    #[test]
    fn test_validate_proposal_rejects_short_hypothesis() {
        let mut proposal = base_proposal();
        proposal.hypothesis = "too short".to_string();
        assert!(validate_proposal(&proposal).is_err());
    }

    #[test]
    fn test_validate_proposal_rejects_bad_rates() {
        let mut proposal = base_proposal();
        proposal.baseline_conversion_rate = 1.5;
        assert!(validate_proposal(&proposal).is_err());

        let mut proposal = base_proposal();
        proposal.minimum_detectable_effect = -0.2;
        assert!(validate_proposal(&proposal).is_err());
    }
}
