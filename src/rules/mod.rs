//! Rules Module - Declarative Detection Rules
//!
//! Rules are data: ordered AND-conjunctions of feature conditions over a
//! closed operator set, evaluated by a pure engine.

pub mod catalog;
pub mod engine;
pub mod types;

// Re-export common types
pub use catalog::BASELINE_RULES;
pub use engine::RuleSet;
pub use types::{Condition, ConditionValue, MatchedRule, Operator, Rule, Severity};
