//! Risk Module - Score Fusion & Classification
//!
//! Combines the ML anomaly score and the rule matches into one bounded risk
//! score, maps it to a severity tier, and aggregates batches for dashboards.

pub mod config;
pub mod fusion;
pub mod summary;

// Re-export common types
pub use config::RiskConfig;
pub use fusion::{fuse, fuse_breakdown, fuse_with_config, severity_tier, RiskBreakdown};
pub use summary::{summarize, summarize_with_config, RiskSummary, TierDistribution};
