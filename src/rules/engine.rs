//! Rule Engine
//!
//! Evaluates a feature vector against an ordered rule set. Pure,
//! deterministic, total: a missing feature or an unrecognized operator fails
//! the condition (the rule does not match) instead of raising.

use super::types::{Condition, ConditionValue, MatchedRule, Operator, Rule};
use crate::features::FeatureVector;

// ============================================================================
// RULE SET
// ============================================================================

/// Ordered collection of detection rules. Rules are independent; zero, one,
/// or many may match the same vector.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The built-in baseline catalog.
    pub fn baseline() -> Self {
        Self::new(super::catalog::BASELINE_RULES.clone())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Evaluate every rule against the vector. Matches are returned in
    /// catalog order, not severity order.
    pub fn evaluate(&self, vector: &FeatureVector) -> Vec<MatchedRule> {
        self.rules
            .iter()
            .filter(|rule| rule_matches(rule, vector))
            .map(MatchedRule::from_rule)
            .collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::baseline()
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

/// A rule matches when every condition holds (logical AND, short-circuit).
fn rule_matches(rule: &Rule, vector: &FeatureVector) -> bool {
    rule.conditions
        .iter()
        .all(|condition| condition_holds(rule, condition, vector))
}

fn condition_holds(rule: &Rule, condition: &Condition, vector: &FeatureVector) -> bool {
    // Missing feature: the condition fails, the rule does not match.
    let Some(value) = vector.get_by_name(&condition.feature) else {
        return false;
    };

    match &condition.operator {
        Operator::Eq => condition.value.as_scalar() == Some(value),
        Operator::Ne => match condition.value.as_scalar() {
            Some(expected) => value != expected,
            None => false,
        },
        Operator::Gt => condition
            .value
            .as_scalar()
            .map(|expected| value > expected)
            .unwrap_or(false),
        Operator::Lt => condition
            .value
            .as_scalar()
            .map(|expected| value < expected)
            .unwrap_or(false),
        Operator::In => condition.value.contains(value),
        Operator::NotIn => !condition.value.contains(value),
        Operator::Unknown => {
            // Configuration defect, not a runtime failure: fail closed.
            log::warn!(
                "rule '{}' has an unrecognized operator on feature '{}'; condition fails closed",
                rule.name,
                condition.feature
            );
            false
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
