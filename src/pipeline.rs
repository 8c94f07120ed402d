//! Detection Pipeline
//!
//! The external surface consumed by the transport layer: feature extraction,
//! on-demand training, synchronous per-event scoring, and report generation.
//!
//! Extraction, rule evaluation, and fusion are pure functions safe for
//! unsynchronized concurrent use; the only shared mutable state is the
//! detector's trained model, which follows a single-writer/many-reader
//! publish discipline.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{PipelineError, PipelineResult};
use crate::event::{RawEvent, ScoredEvent};
use crate::features::{EventFeatureExtractor, FeatureVector, HeuristicExtractor};
use crate::model::{AnomalyDetector, DetectorConfig, TrainingSummary};
use crate::report::{IncidentReport, IncidentReporter, TemplateReporter};
use crate::risk::{fuse_breakdown, severity_tier, RiskConfig};
use crate::rules::{MatchedRule, RuleSet, Severity};

// ============================================================================
// EVALUATION RESULT
// ============================================================================

/// The fused per-vector result, computed synchronously.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Evaluation {
    pub anomaly_score: f64,
    pub is_anomaly_ml: bool,
    pub matched_rules: Vec<MatchedRule>,
    pub is_anomaly_rule: bool,
    pub final_risk_score: f64,
    pub severity: Severity,
    /// ML flag OR rule flag - either signal alone is sufficient
    pub is_anomaly: bool,
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Owns the pipeline capabilities: extractor, detector, rule set, fusion
/// config, and reporter. Callers receive an explicit handle; there is no
/// ambient global state.
pub struct DetectionPipeline {
    extractor: Box<dyn EventFeatureExtractor>,
    detector: AnomalyDetector,
    rules: RuleSet,
    risk: RiskConfig,
    reporter: Box<dyn IncidentReporter>,
}

impl DetectionPipeline {
    /// Pipeline with default capabilities: heuristic extractor, baseline
    /// rule catalog, default detector and fusion constants, template
    /// reporter.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn detector(&self) -> &AnomalyDetector {
        &self.detector
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn risk_config(&self) -> &RiskConfig {
        &self.risk
    }

    /// Extract the fixed-schema feature vector for one raw event. Total;
    /// called once per ingested event, before scoring.
    pub fn extract_features(&self, event: &RawEvent) -> FeatureVector {
        self.extractor.extract(event)
    }

    /// Train the anomaly detector over the accumulated feature-vector
    /// corpus. On-demand and non-incremental: the previous model and its
    /// score offset are replaced atomically.
    pub fn train(&self, vectors: &[FeatureVector]) -> PipelineResult<TrainingSummary> {
        self.detector.train(vectors)
    }

    /// Score a vector with the ML detector and the rule engine, then fuse.
    pub fn score_and_evaluate(&self, vector: &FeatureVector) -> Evaluation {
        let verdict = self.detector.evaluate(vector);
        let matched_rules = self.rules.evaluate(vector);
        let is_anomaly_rule = !matched_rules.is_empty();

        let breakdown = fuse_breakdown(verdict.score, &matched_rules, &self.risk);
        let severity = severity_tier(breakdown.final_score, &self.risk);
        let is_anomaly = verdict.is_anomaly || is_anomaly_rule;

        log::debug!(
            "evaluated vector: ml_score={:.4} ml_flag={} rules={} risk={:.2} severity={}",
            verdict.score,
            verdict.is_anomaly,
            matched_rules.len(),
            breakdown.final_score,
            severity
        );

        Evaluation {
            anomaly_score: verdict.score,
            is_anomaly_ml: verdict.is_anomaly,
            matched_rules,
            is_anomaly_rule,
            final_risk_score: breakdown.final_score,
            severity,
            is_anomaly,
        }
    }

    /// Full ingest composition: extract, evaluate, assemble the persisted
    /// row. The returned event is immutable; corrections require a new
    /// record.
    pub fn process(&self, event: RawEvent) -> ScoredEvent {
        let features = self.extract_features(&event);
        log::debug!("extracted features: {}", features.to_log_entry());

        let evaluation = self.score_and_evaluate(&features);
        if evaluation.severity.is_high() {
            log::warn!(
                "high-severity event from '{}': risk {:.2} ({})",
                event.source,
                evaluation.final_risk_score,
                evaluation.severity
            );
        }

        ScoredEvent {
            id: Uuid::new_v4(),
            event,
            features,
            anomaly_score_ml: evaluation.anomaly_score,
            is_anomaly_ml: evaluation.is_anomaly_ml,
            matched_rules: evaluation.matched_rules,
            is_anomaly_rule: evaluation.is_anomaly_rule,
            final_risk_score: evaluation.final_risk_score,
            severity: evaluation.severity,
            is_anomaly: evaluation.is_anomaly,
            processed_at: Utc::now(),
        }
    }

    /// Generate the incident report for a flagged anomaly. Requesting a
    /// report for a non-anomalous event is a caller contract violation and
    /// is rejected.
    pub fn generate_report(&self, event: &ScoredEvent) -> PipelineResult<IncidentReport> {
        if !event.is_anomaly {
            log::warn!(
                "report requested for non-anomalous event {} (risk {:.2})",
                event.id,
                event.final_risk_score
            );
            return Err(PipelineError::ReportPrecondition { id: event.id });
        }
        Ok(self.reporter.report(event))
    }
}

impl Default for DetectionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Assembles a pipeline with overridden capabilities where needed.
pub struct PipelineBuilder {
    extractor: Box<dyn EventFeatureExtractor>,
    detector_config: DetectorConfig,
    rules: RuleSet,
    risk: RiskConfig,
    reporter: Box<dyn IncidentReporter>,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            extractor: Box::new(HeuristicExtractor::new()),
            detector_config: DetectorConfig::default(),
            rules: RuleSet::baseline(),
            risk: RiskConfig::default(),
            reporter: Box::new(TemplateReporter::new()),
        }
    }
}

impl PipelineBuilder {
    pub fn extractor(mut self, extractor: Box<dyn EventFeatureExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn detector_config(mut self, config: DetectorConfig) -> Self {
        self.detector_config = config;
        self
    }

    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn risk_config(mut self, risk: RiskConfig) -> Self {
        self.risk = risk;
        self
    }

    pub fn reporter(mut self, reporter: Box<dyn IncidentReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn build(self) -> DetectionPipeline {
        DetectionPipeline {
            extractor: self.extractor,
            detector: AnomalyDetector::new(self.detector_config),
            rules: self.rules,
            risk: self.risk,
            reporter: self.reporter,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
