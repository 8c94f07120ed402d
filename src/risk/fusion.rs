//! Risk Fusion & Classification
//!
//! Deterministic, pure combination of the ML anomaly score and the rule
//! matches into one bounded risk score, plus the tier mapping. The single
//! highest-severity match dominates the rule component; scores are never
//! summed across rules.

use super::config::RiskConfig;
use crate::rules::{MatchedRule, Severity};

// ============================================================================
// BREAKDOWN
// ============================================================================

/// How the final score was assembled.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct RiskBreakdown {
    /// Anomaly score scaled to [0, 100] (higher = more anomalous)
    pub anomaly_component: f64,
    /// Highest matched-rule score, 0 when nothing matched
    pub rule_component: f64,
    /// Reserved additive modifier
    pub geo_modifier: f64,
    /// Weighted sum clamped to [0, 100]
    pub final_score: f64,
}

// ============================================================================
// FUSION
// ============================================================================

/// Fuse with the default configuration.
pub fn fuse(anomaly_score: f64, matched_rules: &[MatchedRule]) -> f64 {
    fuse_with_config(anomaly_score, matched_rules, &RiskConfig::default())
}

pub fn fuse_with_config(
    anomaly_score: f64,
    matched_rules: &[MatchedRule],
    config: &RiskConfig,
) -> f64 {
    fuse_breakdown(anomaly_score, matched_rules, config).final_score
}

/// Full fusion with per-component breakdown.
pub fn fuse_breakdown(
    anomaly_score: f64,
    matched_rules: &[MatchedRule],
    config: &RiskConfig,
) -> RiskBreakdown {
    // 1-3. Clamp, normalize so more-anomalous maps higher, scale to [0, 100].
    let clamped = anomaly_score.clamp(config.clamp_min, config.clamp_max);
    let span = config.clamp_max - config.clamp_min;
    let normalized = (config.clamp_max - clamped) / span;
    let anomaly_component = normalized * 100.0;

    // 4. The single highest-severity match dominates.
    let rule_component = matched_rules
        .iter()
        .map(|rule| rule.score)
        .fold(0.0, f64::max);

    // 5. Weighted sum plus the reserved modifier, bounded.
    let final_score = (anomaly_component * config.anomaly_weight
        + rule_component * config.rule_weight
        + config.geo_modifier)
        .clamp(0.0, 100.0);

    RiskBreakdown {
        anomaly_component,
        rule_component,
        geo_modifier: config.geo_modifier,
        final_score,
    }
}

// ============================================================================
// SEVERITY TIER
// ============================================================================

/// Tier mapping: [0,30] Low, (30,60] Medium, (60,80] High, (80,100] Critical.
pub fn severity_tier(final_score: f64, config: &RiskConfig) -> Severity {
    if final_score <= config.low_tier_max {
        Severity::Low
    } else if final_score <= config.medium_tier_max {
        Severity::Medium
    } else if final_score <= config.high_tier_max {
        Severity::High
    } else {
        Severity::Critical
    }
}

// ============================================================================
// TESTS
// ============================================================================
