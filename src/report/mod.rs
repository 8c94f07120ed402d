//! Report Module - Incident Narrative Generation
//!
//! Templated, deterministic reports for flagged anomalies. Not a language
//! model: a reproducible projection of the scored event.

pub mod generator;
pub mod types;

// Re-export common types
pub use generator::{IncidentReporter, TemplateReporter, MITRE_TAGS};
pub use types::{AttackCategory, IncidentReport};
