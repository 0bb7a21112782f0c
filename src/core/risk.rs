//! Risk level bucketing.
//!
//! A project's risk level is derived from its continuous `risk_score`:
//!
//! | level    | score range  |
//! |----------|--------------|
//! | low      | `[0, 25)`    |
//! | medium   | `[25, 50)`   |
//! | high     | `[50, 75)`   |
//! | critical | `[75, 100]`  |
//!
//! Search filters and dashboard counts both go through [`score_bounds`], so the
//! two can never disagree on a bucket edge.

use crate::entities::enums::RiskLevel;

/// Lowest score classified as medium.
pub const MEDIUM_THRESHOLD: f64 = 25.0;
/// Lowest score classified as high.
pub const HIGH_THRESHOLD: f64 = 50.0;
/// Lowest score classified as critical.
pub const CRITICAL_THRESHOLD: f64 = 75.0;

/// Buckets a risk score.
#[must_use]
pub fn risk_level(score: f64) -> RiskLevel {
    if score >= CRITICAL_THRESHOLD {
        RiskLevel::Critical
    } else if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Score range of a bucket: inclusive lower bound, exclusive upper bound
/// (`None` for the open-ended critical bucket).
#[must_use]
pub const fn score_bounds(level: RiskLevel) -> (Option<f64>, Option<f64>) {
    match level {
        RiskLevel::Low => (None, Some(MEDIUM_THRESHOLD)),
        RiskLevel::Medium => (Some(MEDIUM_THRESHOLD), Some(HIGH_THRESHOLD)),
        RiskLevel::High => (Some(HIGH_THRESHOLD), Some(CRITICAL_THRESHOLD)),
        RiskLevel::Critical => (Some(CRITICAL_THRESHOLD), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn test_bucket_edges() {
        assert_eq!(risk_level(0.0), RiskLevel::Low);
        assert_eq!(risk_level(24.99), RiskLevel::Low);
        assert_eq!(risk_level(25.0), RiskLevel::Medium);
        assert_eq!(risk_level(49.9), RiskLevel::Medium);
        assert_eq!(risk_level(50.0), RiskLevel::High);
        assert_eq!(risk_level(75.0), RiskLevel::Critical);
        assert_eq!(risk_level(100.0), RiskLevel::Critical);
    }

    #[test]
    fn test_bounds_agree_with_bucketing() {
        for score in [0.0, 10.0, 25.0, 30.0, 50.0, 74.9, 75.0, 99.0] {
            for level in RiskLevel::iter() {
                let (low, high) = score_bounds(level);
                let inside = low.is_none_or(|l| score >= l) && high.is_none_or(|h| score < h);
                assert_eq!(inside, risk_level(score) == level, "score {score}, {level:?}");
            }
        }
    }
}
