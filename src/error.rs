//! Error handling
//!
//! The pipeline's caller-visible failures. Everything else degrades locally:
//! malformed timestamps fall back to the invocation time, unknown rule
//! operators fail closed with a warning. No failure mode leaves shared state
//! corrupt.

use thiserror::Error;
use uuid::Uuid;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Training was requested over an empty batch. The pipeline stays usable
    /// with the prior model, or neutral scores if never trained.
    #[error("no feature vectors available to train the anomaly detector")]
    InsufficientData,

    /// A report was requested for an event that is not flagged anomalous.
    #[error("event {id} is not flagged as an anomaly; reports are only generated for anomalies")]
    ReportPrecondition { id: Uuid },
}
