//! Risk Summary
//!
//! Dashboard-style aggregation over a batch of scored events. Pure function;
//! querying and pagination belong to the storage collaborator.

use serde::{Deserialize, Serialize};

use super::config::RiskConfig;
use super::fusion::severity_tier;
use crate::event::ScoredEvent;
use crate::rules::Severity;

/// Per-tier event counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

/// Aggregate risk picture for a set of scored events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSummary {
    pub total_events: usize,
    pub total_anomalies: usize,
    pub average_risk_score: f64,
    pub distribution: TierDistribution,
}

/// Summarize a batch of scored events.
pub fn summarize(events: &[ScoredEvent]) -> RiskSummary {
    summarize_with_config(events, &RiskConfig::default())
}

pub fn summarize_with_config(events: &[ScoredEvent], config: &RiskConfig) -> RiskSummary {
    if events.is_empty() {
        return RiskSummary {
            total_events: 0,
            total_anomalies: 0,
            average_risk_score: 0.0,
            distribution: TierDistribution::default(),
        };
    }

    let mut distribution = TierDistribution::default();
    let mut total_risk = 0.0;
    let mut total_anomalies = 0;

    for event in events {
        total_risk += event.final_risk_score;
        if event.is_anomaly {
            total_anomalies += 1;
        }
        match severity_tier(event.final_risk_score, config) {
            Severity::Low => distribution.low += 1,
            Severity::Medium => distribution.medium += 1,
            Severity::High => distribution.high += 1,
            Severity::Critical => distribution.critical += 1,
        }
    }

    RiskSummary {
        total_events: events.len(),
        total_anomalies,
        average_risk_score: total_risk / events.len() as f64,
        distribution,
    }
}

// ============================================================================
// TESTS
// ============================================================================
