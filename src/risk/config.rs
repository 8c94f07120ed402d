//! Risk Fusion Constants & Configuration
//!
//! No fusion logic here - only the named constants and the overridable
//! config carrying them. The values are hand-tuned; change them through
//! `RiskConfig`, not by editing the constants.

use serde::{Deserialize, Serialize};

// ============================================================================
// SCORE CLAMP
// ============================================================================

/// Raw anomaly scores are clamped to this range before normalization.
pub const SCORE_CLAMP_MIN: f64 = -0.6;
pub const SCORE_CLAMP_MAX: f64 = 0.6;

// ============================================================================
// WEIGHTS
// ============================================================================

/// Weight of the scaled anomaly component (60%)
pub const ANOMALY_WEIGHT: f64 = 0.6;

/// Weight of the rule-severity component (40%)
pub const RULE_WEIGHT: f64 = 0.4;

/// Reserved geo-risk extension point, fixed at 0
pub const GEO_MODIFIER: f64 = 0.0;

// ============================================================================
// SEVERITY TIER BOUNDS
// ============================================================================

/// Final score <= this = Low
pub const LOW_TIER_MAX: f64 = 30.0;

/// Final score <= this (and above Low) = Medium
pub const MEDIUM_TIER_MAX: f64 = 60.0;

/// Final score <= this (and above Medium) = High; above = Critical
pub const HIGH_TIER_MAX: f64 = 80.0;

// ============================================================================
// CONFIG
// ============================================================================

/// Fusion parameters (overridable per pipeline instance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Lower clamp bound for the raw anomaly score
    pub clamp_min: f64,
    /// Upper clamp bound for the raw anomaly score
    pub clamp_max: f64,
    /// Weight of the anomaly component
    pub anomaly_weight: f64,
    /// Weight of the rule component
    pub rule_weight: f64,
    /// Additive geo-risk modifier (reserved, 0)
    pub geo_modifier: f64,
    /// Severity tier bounds
    pub low_tier_max: f64,
    pub medium_tier_max: f64,
    pub high_tier_max: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            clamp_min: SCORE_CLAMP_MIN,
            clamp_max: SCORE_CLAMP_MAX,
            anomaly_weight: ANOMALY_WEIGHT,
            rule_weight: RULE_WEIGHT,
            geo_modifier: GEO_MODIFIER,
            low_tier_max: LOW_TIER_MAX,
            medium_tier_max: MEDIUM_TIER_MAX,
            high_tier_max: HIGH_TIER_MAX,
        }
    }
}
