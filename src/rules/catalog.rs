//! Baseline Rule Catalog
//!
//! The built-in detection rules. Hour ranges are materialized as sets so the
//! conditions stay within the closed operator vocabulary.

use once_cell::sync::Lazy;

use super::types::{Condition, ConditionValue, Operator, Rule, Severity};

fn hours(range: std::ops::Range<u32>) -> ConditionValue {
    ConditionValue::Set(range.map(f64::from).collect())
}

fn eq(feature: &str, value: f64) -> Condition {
    Condition {
        feature: feature.to_string(),
        operator: Operator::Eq,
        value: ConditionValue::Scalar(value),
    }
}

fn not_in(feature: &str, value: ConditionValue) -> Condition {
    Condition {
        feature: feature.to_string(),
        operator: Operator::NotIn,
        value,
    }
}

/// Built-in detection rules, in evaluation order.
pub static BASELINE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule {
            name: "Admin Login Outside Business Hours".to_string(),
            conditions: vec![
                eq("is_admin_account", 1.0),
                not_in("login_hour", hours(8..18)), // 8 AM to 5 PM
                eq("is_weekend", 0.0),
            ],
            severity: Severity::High,
            description: "An administrative account logged in outside typical \
                          8 AM - 5 PM business hours on a weekday."
                .to_string(),
        },
        Rule {
            name: "Admin Login on Weekend".to_string(),
            conditions: vec![eq("is_admin_account", 1.0), eq("is_weekend", 1.0)],
            severity: Severity::Critical,
            description: "An administrative account logged in during the weekend.".to_string(),
        },
        Rule {
            name: "Unusual Login Hour (Non-Admin)".to_string(),
            conditions: vec![
                eq("is_admin_account", 0.0),
                not_in("login_hour", hours(7..20)), // 7 AM to 7 PM
                eq("is_weekend", 0.0),
            ],
            severity: Severity::Medium,
            description: "A non-administrative account logged in outside typical \
                          7 AM - 7 PM business hours on a weekday."
                .to_string(),
        },
        Rule {
            name: "Process Execution by Admin on Weekend".to_string(),
            conditions: vec![
                eq("is_admin_account", 1.0),
                eq("event_type_process_exec", 1.0),
                eq("is_weekend", 1.0),
            ],
            severity: Severity::High,
            description: "An administrative account executed a process during the weekend."
                .to_string(),
        },
    ]
});

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(BASELINE_RULES.len(), 4);
        // Rule names are unique
        let mut names: Vec<&str> = BASELINE_RULES.iter().map(|r| r.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_business_hours_set() {
        let rule = &BASELINE_RULES[0];
        let hours_cond = &rule.conditions[1];
        assert_eq!(hours_cond.operator, Operator::NotIn);
        // 8..18 inclusive-exclusive: 8 in, 18 out
        assert!(hours_cond.value.contains(8.0));
        assert!(hours_cond.value.contains(17.0));
        assert!(!hours_cond.value.contains(18.0));
        assert!(!hours_cond.value.contains(7.0));
    }

    #[test]
    fn test_severities_match_catalog() {
        assert_eq!(BASELINE_RULES[0].severity, Severity::High);
        assert_eq!(BASELINE_RULES[1].severity, Severity::Critical);
        assert_eq!(BASELINE_RULES[2].severity, Severity::Medium);
        assert_eq!(BASELINE_RULES[3].severity, Severity::High);
    }
}
