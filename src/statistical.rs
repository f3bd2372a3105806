//! Statistical analysis for test readiness
//!
//! Sample size via the two-proportion z-test formula, duration estimates from
//! daily traffic, and the statistical warning set. Pure functions of their
//! inputs; safe to call concurrently.

use crate::errors::{AppError, Result};
use crate::models::{StatisticalAnalysis, TestProposal};

/// Reported confidence level (alpha is always the 0.05 default)
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// Reported statistical power
pub const STATISTICAL_POWER: f64 = 0.80;

/// Default two-sided significance level
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Minimum sample size per variation regardless of the formula
pub const MIN_SAMPLE_SIZE: u64 = 100;

/// Minimum test duration in days
pub const MIN_DURATION_DAYS: u64 = 1;

/// Inverse normal CDF (Acklam's rational approximation)
///
/// Absolute error below 1.15e-9 over the full open interval, more than
/// enough for z-values feeding a sample-size ceiling.
fn inverse_normal_cdf(p: f64) -> f64 {
    let a = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    let b = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    let c = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    let d = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];

    let p_low = 0.02425;
    let p_high = 1.0 - p_low;

    if p < p_low {
        let q = (-2.0 * p.ln()).sqrt();
        (((((c[0] * q + c[1]) * q + c[2]) * q + c[3]) * q + c[4]) * q + c[5])
            / ((((d[0] * q + d[1]) * q + d[2]) * q + d[3]) * q + 1.0)
    } else if p <= p_high {
        let q = p - 0.5;
        let r = q * q;
        (((((a[0] * r + a[1]) * r + a[2]) * r + a[3]) * r + a[4]) * r + a[5]) * q
            / (((((b[0] * r + b[1]) * r + b[2]) * r + b[3]) * r + b[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((c[0] * q + c[1]) * q + c[2]) * q + c[3]) * q + c[4]) * q + c[5])
            / ((((d[0] * q + d[1]) * q + d[2]) * q + d[3]) * q + 1.0)
    }
}

/// Required sample size per variation for a two-sample proportion test.
///
/// n = ceil((z_alpha + z_beta)^2 * 2 * p_pooled * (1 - p_pooled) / mde^2),
/// floored at [`MIN_SAMPLE_SIZE`]. A zero or non-finite MDE must fail here
/// rather than divide to infinity - validation normally excludes it, but the
/// estimator guards its own denominator.
pub fn estimate_sample_size(
    baseline_rate: f64,
    mde: f64,
    power: f64,
    alpha: f64,
) -> Result<u64> {
    if !baseline_rate.is_finite() || !mde.is_finite() {
        return Err(AppError::InvalidParameter(format!(
            "sample size inputs must be finite (baseline={baseline_rate}, mde={mde})"
        )));
    }

    if mde <= 0.0 {
        return Err(AppError::InvalidParameter(format!(
            "minimum detectable effect must be positive, got: {mde}"
        )));
    }

    if !(0.0..1.0).contains(&power) || !(0.0..1.0).contains(&alpha) {
        return Err(AppError::InvalidParameter(format!(
            "power and alpha must be in (0, 1), got power={power}, alpha={alpha}"
        )));
    }

    let z_alpha = inverse_normal_cdf(1.0 - alpha / 2.0);
    let z_beta = inverse_normal_cdf(power);

    let p1 = baseline_rate;
    let p2 = (baseline_rate + mde).min(1.0);
    let p_pooled = (p1 + p2) / 2.0;

    let numerator = (z_alpha + z_beta).powi(2) * 2.0 * p_pooled * (1.0 - p_pooled);
    let sample_size = (numerator / mde.powi(2)).ceil() as u64;

    Ok(sample_size.max(MIN_SAMPLE_SIZE))
}

/// Estimated test duration in days, floored at one day.
pub fn estimate_duration(
    required_sample_size: u64,
    daily_traffic: u64,
    number_of_variations: u64,
) -> u64 {
    // Saturate: a tiny MDE can push the sample size to u64::MAX
    let total_samples_needed = required_sample_size.saturating_mul(number_of_variations);
    let duration = total_samples_needed.div_ceil(daily_traffic);

    duration.max(MIN_DURATION_DAYS)
}

/// Full statistical analysis of a proposal: sample size, duration,
/// per-day throughput, and ordered warnings.
pub fn analyze(proposal: &TestProposal) -> Result<StatisticalAnalysis> {
    let mut warnings: Vec<String> = Vec::new();

    let required_sample_size = estimate_sample_size(
        proposal.baseline_conversion_rate,
        proposal.minimum_detectable_effect,
        STATISTICAL_POWER,
        DEFAULT_ALPHA,
    )?;

    let estimated_duration = estimate_duration(
        required_sample_size,
        proposal.daily_traffic,
        proposal.number_of_variations,
    );

    let total_samples_needed = required_sample_size.saturating_mul(proposal.number_of_variations);
    let samples_per_day = total_samples_needed.div_ceil(estimated_duration);

    // Warning order is part of the contract: the two duration warnings are
    // mutually exclusive, as are the two MDE warnings.
    if estimated_duration > 60 {
        warnings.push(format!(
            "Test duration is {estimated_duration} days, which may be too long. \
             Consider increasing traffic or reducing MDE."
        ));
    } else if estimated_duration > 30 {
        warnings.push(format!(
            "Test duration is {estimated_duration} days. \
             Consider if this timeline is acceptable for your business."
        ));
    }

    if proposal.minimum_detectable_effect < 0.01 {
        warnings.push(
            "Very small MDE detected. This may require very large sample sizes \
             and long test durations."
                .to_string(),
        );
    } else if proposal.minimum_detectable_effect > 0.5 {
        warnings.push(
            "Large MDE detected. This may indicate unrealistic expectations \
             for the test impact."
                .to_string(),
        );
    }

    if proposal.baseline_conversion_rate < 0.01 {
        warnings.push(
            "Very low baseline conversion rate. Consider if the metric is \
             appropriate for testing."
                .to_string(),
        );
    }

    if proposal.number_of_variations > 4 {
        warnings.push(format!(
            "Testing {} variations may dilute traffic and reduce statistical power.",
            proposal.number_of_variations
        ));
    }

    if samples_per_day > proposal.daily_traffic {
        warnings.push(format!(
            "Daily traffic ({}) is insufficient for required sample rate \
             ({samples_per_day} samples/day).",
            proposal.daily_traffic
        ));
    }

    Ok(StatisticalAnalysis {
        required_sample_size,
        estimated_duration_days: estimated_duration,
        samples_per_day_needed: samples_per_day,
        confidence_level: CONFIDENCE_LEVEL,
        statistical_power: STATISTICAL_POWER,
        warnings,
    })
}
