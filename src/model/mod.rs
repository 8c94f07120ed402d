//! Model Module - Unsupervised Anomaly Scoring
//!
//! Isolation-forest ensemble plus the trained-model handle. The handle is an
//! owned value with a publish/snapshot boundary; there is no ambient global
//! state.

pub mod detector;
pub mod forest;

// Re-export common types
pub use detector::{AnomalyDetector, DetectorConfig, MlVerdict, TrainedModel, TrainingSummary};
pub use forest::{ForestConfig, IsolationForest};
