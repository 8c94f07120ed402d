//! Incident Report Generation
//!
//! Deterministic template assembly over a scored event. This is the slot a
//! real text-generation collaborator would fill; any substitute must stay a
//! pure function of the scored event to preserve testability.

use chrono::Utc;

use super::types::{AttackCategory, IncidentReport};
use crate::event::ScoredEvent;
use crate::rules::MatchedRule;

// ============================================================================
// STATIC CONTENT
// ============================================================================

/// Illustrative ATT&CK technique tags attached to every report.
pub const MITRE_TAGS: &[&str] = &[
    "T1078 - Valid Accounts",
    "T1059 - Command and Scripting Interpreter",
];

const PREVENTION_STRATEGY: &[&str] = &[
    "Implement strong access controls and multi-factor authentication.",
    "Regularly audit administrative activity.",
    "Educate users on security best practices.",
];

// ============================================================================
// REPORTER CAPABILITY
// ============================================================================

/// Replaceable report-generation capability. The precondition (only
/// anomalous events) is enforced by the pipeline before this is invoked.
pub trait IncidentReporter: Send + Sync {
    fn report(&self, event: &ScoredEvent) -> IncidentReport;
}

/// Default reporter: fixed templates filled from the scored event.
#[derive(Debug, Clone, Default)]
pub struct TemplateReporter;

impl TemplateReporter {
    pub fn new() -> Self {
        Self
    }
}

impl IncidentReporter for TemplateReporter {
    fn report(&self, event: &ScoredEvent) -> IncidentReport {
        let severity = event.severity;
        let source = &event.event.source;
        let event_type = &event.event.event_type;

        let summary = format!(
            "Incident detected with ID {}. A {} risk event was identified originating \
             from '{}' concerning an '{}' event.",
            event.id, severity, source, event_type
        );

        // One sentence per contributing signal.
        let mut explanation = vec![format!("The primary event was: '{}'.", event.event.message)];
        if event.is_anomaly_ml {
            explanation.push(format!(
                "Behavioral anomaly detection flagged this activity as unusual \
                 (ML anomaly score: {:.2}).",
                event.anomaly_score_ml
            ));
        }
        if !event.matched_rules.is_empty() {
            let names: Vec<&str> = event
                .matched_rules
                .iter()
                .map(|r| r.name.as_str())
                .collect();
            explanation.push(format!(
                "The following security rules were triggered: {}.",
                names.join(", ")
            ));
        }

        let ip_address = event
            .event
            .metadata
            .get("ip_address")
            .and_then(|v| v.as_str())
            .unwrap_or("N/A")
            .to_string();

        let recommended_actions = vec![
            format!(
                "Review event {} and its raw message for more context.",
                event.id
            ),
            format!("Investigate the user and system '{}' involved in the event.", source),
            "If a rule was triggered, verify whether the activity was legitimate or malicious."
                .to_string(),
            format!(
                "Consider blocking the source IP if activity is confirmed malicious (e.g., {}).",
                ip_address
            ),
        ];

        let executive_summary = format!(
            "A {} risk incident was detected involving {} from {}. The final risk score \
             was {:.2}. Immediate investigation and remediation actions are recommended \
             as detailed in this report to prevent potential security breaches.",
            severity, event_type, source, event.final_risk_score
        );

        IncidentReport {
            incident_id: event.id,
            generated_at: Utc::now(),
            severity,
            final_risk_score: event.final_risk_score,
            summary,
            affected_source: source.clone(),
            possible_attack_type: categorize(&event.matched_rules),
            detailed_explanation: explanation.join(" "),
            recommended_actions,
            prevention_strategy: PREVENTION_STRATEGY.iter().map(|s| s.to_string()).collect(),
            mitre_attack_mapping: MITRE_TAGS.iter().map(|s| s.to_string()).collect(),
            executive_summary,
        }
    }
}

// ============================================================================
// ATTACK CATEGORIZATION
// ============================================================================

/// Keyword match on matched-rule names, first category wins.
fn categorize(matched_rules: &[MatchedRule]) -> AttackCategory {
    let any_name_contains =
        |keyword: &str| matched_rules.iter().any(|r| r.name.to_lowercase().contains(keyword));

    if any_name_contains("admin") {
        AttackCategory::PrivilegeMisuse
    } else if any_name_contains("process") {
        AttackCategory::ExecutionAttempt
    } else if any_name_contains("file") {
        AttackCategory::DataExfiltration
    } else {
        AttackCategory::UnusualActivity
    }
}

// ============================================================================
// TESTS
// ============================================================================
