//! Rule Types
//!
//! Data structures only - rules are declarative configuration, evaluated by
//! `engine.rs`. Modeling rules as data keeps the engine total and lets the
//! catalog be reconfigured at runtime without recompilation.

use serde::{Deserialize, Serialize};

// ============================================================================
// SEVERITY
// ============================================================================

/// Severity of a matched rule, also used as the tier of a fused risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Numeric score a matched rule of this severity contributes to fusion.
    pub fn score(&self) -> f64 {
        match self {
            Severity::Low => 20.0,
            Severity::Medium => 50.0,
            Severity::High => 80.0,
            Severity::Critical => 100.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// OPERATORS
// ============================================================================

/// Condition operators. The set is closed; anything else deserializes to
/// `Unknown`, which fails closed at evaluation time (the rule never matches)
/// rather than raising.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not_in")]
    NotIn,
    /// Unrecognized operator in a rule definition - a configuration defect
    #[serde(other)]
    Unknown,
}

// ============================================================================
// CONDITION VALUES
// ============================================================================

/// Right-hand side of a condition: a scalar for comparisons, a set for
/// membership tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Scalar(f64),
    Set(Vec<f64>),
}

impl ConditionValue {
    pub fn contains(&self, value: f64) -> bool {
        match self {
            ConditionValue::Scalar(s) => *s == value,
            ConditionValue::Set(set) => set.contains(&value),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ConditionValue::Scalar(s) => Some(*s),
            ConditionValue::Set(_) => None,
        }
    }
}

// ============================================================================
// RULES
// ============================================================================

/// One feature condition. A missing feature fails the condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub feature: String,
    pub operator: Operator,
    pub value: ConditionValue,
}

/// Declarative detection rule: an AND-conjunction of conditions with an
/// associated severity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub conditions: Vec<Condition>,
    pub severity: Severity,
    pub description: String,
}

/// One rule match, produced per rule per evaluation; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedRule {
    pub name: String,
    pub severity: Severity,
    pub description: String,
    pub score: f64,
}

impl MatchedRule {
    pub fn from_rule(rule: &Rule) -> Self {
        Self {
            name: rule.name.clone(),
            severity: rule.severity,
            description: rule.description.clone(),
            score: rule.severity.score(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_score_table() {
        assert_eq!(Severity::Low.score(), 20.0);
        assert_eq!(Severity::Medium.score(), 50.0);
        assert_eq!(Severity::High.score(), 80.0);
        assert_eq!(Severity::Critical.score(), 100.0);
    }

    #[test]
    fn test_is_high() {
        assert!(Severity::High.is_high());
        assert!(Severity::Critical.is_high());
        assert!(!Severity::Low.is_high());
        assert!(!Severity::Medium.is_high());
    }

    #[test]
    fn test_operator_serde_names() {
        assert_eq!(serde_json::to_string(&Operator::Eq).unwrap(), r#""==""#);
        assert_eq!(serde_json::to_string(&Operator::NotIn).unwrap(), r#""not_in""#);

        let op: Operator = serde_json::from_str(r#"">""#).unwrap();
        assert_eq!(op, Operator::Gt);
    }

    #[test]
    fn test_unrecognized_operator_deserializes_to_unknown() {
        let op: Operator = serde_json::from_str(r#""matches_regex""#).unwrap();
        assert_eq!(op, Operator::Unknown);
    }

    #[test]
    fn test_condition_value_untagged() {
        let scalar: ConditionValue = serde_json::from_str("1").unwrap();
        assert_eq!(scalar, ConditionValue::Scalar(1.0));

        let set: ConditionValue = serde_json::from_str("[8, 9, 10]").unwrap();
        assert!(set.contains(9.0));
        assert!(!set.contains(7.0));
    }
}
