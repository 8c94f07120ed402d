//! SOC Lite Core - Security Event Detection Pipeline
//!
//! Synchronous per-event detection: fixed-schema feature extraction, an
//! isolation-forest anomaly detector trained on demand, a declarative rule
//! engine, weighted risk fusion with severity tiers, and templated incident
//! reports for flagged events.
//!
//! The [`pipeline::DetectionPipeline`] facade wires the stages together;
//! each stage is also usable on its own.

pub mod error;
pub mod event;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod risk;
pub mod rules;

// Re-export the primary surface
pub use error::{PipelineError, PipelineResult};
pub use event::{EventTime, RawEvent, ScoredEvent};
pub use features::{EventFeatureExtractor, FeatureVector, HeuristicExtractor};
pub use model::{AnomalyDetector, DetectorConfig, TrainingSummary};
pub use pipeline::{DetectionPipeline, Evaluation, PipelineBuilder};
pub use report::{IncidentReport, IncidentReporter, TemplateReporter};
pub use risk::{RiskConfig, RiskSummary};
pub use rules::{MatchedRule, Rule, RuleSet, Severity};
