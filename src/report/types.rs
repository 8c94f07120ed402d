//! Incident Report Types
//!
//! Data structures only - the report document and the coarse attack
//! categorization it carries. Reports are read-only projections of a scored
//! event, computed on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rules::Severity;

// ============================================================================
// ATTACK CATEGORY
// ============================================================================

/// Best-effort attack categorization derived from matched-rule names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackCategory {
    /// Rule names mentioning admin accounts
    PrivilegeMisuse,
    /// Rule names mentioning process activity
    ExecutionAttempt,
    /// Rule names mentioning file activity
    DataExfiltration,
    /// Nothing more specific applies
    UnusualActivity,
}

impl AttackCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackCategory::PrivilegeMisuse => "Privilege Misuse / Unauthorized Access",
            AttackCategory::ExecutionAttempt => "Execution Attempt",
            AttackCategory::DataExfiltration => "Data Exfiltration / Unauthorized Access",
            AttackCategory::UnusualActivity => "Unusual Activity",
        }
    }
}

impl std::fmt::Display for AttackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// INCIDENT REPORT
// ============================================================================

/// Structured analyst-facing report for one anomalous event. Deterministic
/// template assembly - a reproducible function of the scored event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentReport {
    pub incident_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub severity: Severity,
    pub final_risk_score: f64,

    /// One-paragraph summary naming source, event type, and severity
    pub summary: String,
    /// Systems/sources involved
    pub affected_source: String,
    pub possible_attack_type: AttackCategory,
    /// One sentence per contributing signal (ML flag, each matched rule)
    pub detailed_explanation: String,
    /// Mitigation steps parameterized with the event's identifiers
    pub recommended_actions: Vec<String>,
    /// Generic hardening guidance
    pub prevention_strategy: Vec<String>,
    /// Illustrative ATT&CK technique tags
    pub mitre_attack_mapping: Vec<String>,
    pub executive_summary: String,
}
