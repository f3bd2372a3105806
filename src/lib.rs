//! Test Readiness Analyzer Library
//!
//! Pre-launch analysis for A/B test proposals: statistical sample-size and
//! duration estimation, heuristic hypothesis quality scoring, and test
//! design validation, folded into a single readiness verdict.
//!
//! # Pipeline
//! - Statistical: two-proportion z-test sample size, duration, warnings
//! - Hypothesis: keyword-driven scoring across four dimensions (0-10)
//! - Design: variation count, traffic allocation, and metric checks
//! - Aggregation: READY / NEEDS_WORK / NOT_READY with recommendations
//!
//! All analysis is pure computation over the proposal; the HTTP layer in
//! `handlers` is a thin transport over it.

pub mod analyzer;
pub mod config;
pub mod design;
pub mod errors;
pub mod handlers;
pub mod hypothesis;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod statistical;
pub mod validation;

// Re-export dependencies to ensure tests use the same version
pub use chrono;
