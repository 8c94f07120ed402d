//! Security Event Types
//!
//! Immutable event records flowing through the pipeline: the raw record as
//! collectors deliver it, and the scored row the pipeline produces. Scored
//! events are created once and never mutated; corrections require a new
//! record.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::FeatureVector;
use crate::rules::{MatchedRule, Severity};

// ============================================================================
// EVENT TIMESTAMP
// ============================================================================

/// Timestamp of a raw event as delivered by a collector.
///
/// Collectors may send an already-structured timestamp or a raw ISO-8601
/// string; either resolves to a wall-clock time for feature extraction.
/// Malformed or missing values resolve to the supplied fallback instead of
/// failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    /// Structured UTC timestamp
    At(DateTime<Utc>),
    /// Unparsed ISO-8601 text, resolved at extraction time
    Text(String),
    /// No timestamp supplied
    #[default]
    Missing,
}

impl EventTime {
    /// Resolve to a wall-clock `NaiveDateTime`.
    ///
    /// Text timestamps keep the hour/minute exactly as written (events carry
    /// the clock of the system that produced them); parse failures and
    /// missing values degrade to `fallback`.
    pub fn resolve(&self, fallback: DateTime<Utc>) -> NaiveDateTime {
        match self {
            EventTime::At(dt) => dt.naive_utc(),
            EventTime::Text(s) => parse_iso8601(s).unwrap_or_else(|| fallback.naive_utc()),
            EventTime::Missing => fallback.naive_utc(),
        }
    }
}

fn parse_iso8601(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    // ISO-8601 without an offset
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive);
    }
    None
}

// ============================================================================
// RAW EVENT
// ============================================================================

/// One security-relevant event record as ingested.
///
/// Immutable once created; produced by collectors outside the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub timestamp: EventTime,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl RawEvent {
    /// String metadata field, lower-cased; absent or non-string fields yield
    /// an empty string.
    pub fn metadata_str(&self, key: &str) -> String {
        self.metadata
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default()
    }
}

// ============================================================================
// SCORED EVENT
// ============================================================================

/// The fused per-event result: raw record + features + both detector
/// verdicts + final risk. This is the unit persisted and reported on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredEvent {
    pub id: Uuid,
    pub event: RawEvent,
    pub features: FeatureVector,

    /// Decision score from the ML detector (lower = more anomalous, 0 is
    /// the boundary)
    pub anomaly_score_ml: f64,
    /// ML detector verdict (trained model and score below 0)
    pub is_anomaly_ml: bool,

    /// Rules that matched this event, in catalog order
    pub matched_rules: Vec<MatchedRule>,
    /// Rule engine verdict (at least one rule matched)
    pub is_anomaly_rule: bool,

    /// Fused risk score in [0, 100]
    pub final_risk_score: f64,
    /// Severity tier derived from the final risk score
    pub severity: Severity,
    /// Overall verdict: ML flag OR rule flag
    pub is_anomaly: bool,

    pub processed_at: DateTime<Utc>,
}

// ============================================================================
// TESTS
// ============================================================================
