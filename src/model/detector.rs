//! Anomaly Detector - Trained-model handle
//!
//! Owns the shared mutable state of the pipeline: the trained isolation
//! forest and its score offset. Readers take a snapshot of the current
//! model reference; training builds a complete replacement off to the side
//! and publishes it in a single swap, so a score call can never observe a
//! half-replaced model.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::forest::{ForestConfig, IsolationForest};
use crate::error::PipelineError;
use crate::features::FeatureVector;

// ============================================================================
// CONFIG
// ============================================================================

/// Detector configuration. Defaults mirror the classic isolation-forest
/// setup: 100 trees over 256-point sub-samples, seeded for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Number of trees in the ensemble
    pub trees: usize,
    /// Sub-sample size per tree
    pub sample_size: usize,
    /// Expected proportion of outliers in the training data; sets the score
    /// offset so roughly this fraction lands below the 0 boundary
    pub contamination: f64,
    /// RNG seed consumed at train time
    pub seed: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            sample_size: 256,
            contamination: 0.05,
            seed: 42,
        }
    }
}

impl DetectorConfig {
    pub fn with_contamination(contamination: f64) -> Self {
        Self {
            contamination,
            ..Default::default()
        }
    }
}

// ============================================================================
// TRAINED MODEL
// ============================================================================

/// One immutable trained model: the ensemble, the feature schema it was
/// trained on, and the score offset. Replaced wholesale on retrain.
#[derive(Debug)]
pub struct TrainedModel {
    forest: IsolationForest,
    /// Feature ordering recorded from the first training vector
    schema: Vec<String>,
    /// Contamination percentile of the raw training scores, subtracted from
    /// every raw score so that the decision boundary sits at 0
    offset: f64,
    trained_at: DateTime<Utc>,
    sample_count: usize,
}

impl TrainedModel {
    /// Decision score for a vector: raw sample score minus the trained
    /// offset, so inliers land above 0 and anomalies strictly below. The
    /// vector is reordered to the training schema; missing fields default to
    /// 0, extra fields are ignored.
    pub fn score(&self, vector: &FeatureVector) -> f64 {
        let row = self.reorder(vector);
        self.forest.score_samples(&row) - self.offset
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    fn reorder(&self, vector: &FeatureVector) -> Vec<f64> {
        self.schema
            .iter()
            .map(|name| vector.get_by_name(name).unwrap_or(0.0))
            .collect()
    }
}

/// Training outcome reported back to the operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub samples: usize,
    pub offset: f64,
    pub trained_at: DateTime<Utc>,
}

/// ML verdict for one vector, read from a single model snapshot so the score
/// and the offset always belong to the same model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MlVerdict {
    /// Decision score (lower = more anomalous, 0 is the boundary); 0.0 when
    /// untrained
    pub score: f64,
    /// True iff trained and score < 0
    pub is_anomaly: bool,
}

impl MlVerdict {
    fn neutral() -> Self {
        Self {
            score: 0.0,
            is_anomaly: false,
        }
    }
}

// ============================================================================
// DETECTOR
// ============================================================================

/// Unsupervised anomaly scorer over feature vectors.
///
/// Single-writer/many-reader: `score`/`evaluate` clone the current `Arc`
/// under a read lock; `train` holds the write lock only for the final swap.
pub struct AnomalyDetector {
    config: DetectorConfig,
    model: RwLock<Option<Arc<TrainedModel>>>,
}

impl AnomalyDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            model: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Train on a batch of feature vectors, atomically replacing any
    /// previous model and offset. There is no incremental update.
    pub fn train(&self, vectors: &[FeatureVector]) -> Result<TrainingSummary, PipelineError> {
        if vectors.is_empty() {
            return Err(PipelineError::InsufficientData);
        }

        // The field ordering of the first vector becomes the schema for all
        // future scoring.
        let schema: Vec<String> = vectors[0]
            .feature_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows: Vec<Vec<f64>> = vectors
            .iter()
            .map(|v| {
                schema
                    .iter()
                    .map(|name| v.get_by_name(name).unwrap_or(0.0))
                    .collect()
            })
            .collect();

        let forest_config = ForestConfig {
            trees: self.config.trees,
            sample_size: self.config.sample_size,
        };
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let forest = IsolationForest::fit(&rows, &forest_config, &mut rng);

        // Offset at the contamination percentile of the raw training scores;
        // subtracting it places the decision boundary at 0, with roughly the
        // contamination fraction of the training data below it.
        let mut scores: Vec<f64> = rows.iter().map(|row| forest.score_samples(row)).collect();
        scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let offset = percentile(&scores, self.config.contamination);

        let trained_at = Utc::now();
        let model = Arc::new(TrainedModel {
            forest,
            schema,
            offset,
            trained_at,
            sample_count: vectors.len(),
        });

        log::info!(
            "anomaly model trained on {} samples ({} trees over {}-point sub-samples, offset {:.4})",
            vectors.len(),
            model.forest.tree_count(),
            model.forest.sample_size(),
            offset
        );

        // Publish: the only write to shared state.
        *self.model.write() = Some(model);

        Ok(TrainingSummary {
            samples: vectors.len(),
            offset,
            trained_at,
        })
    }

    /// Snapshot of the current model, if trained.
    pub fn snapshot(&self) -> Option<Arc<TrainedModel>> {
        self.model.read().clone()
    }

    pub fn is_trained(&self) -> bool {
        self.model.read().is_some()
    }

    /// Current score offset, if trained.
    pub fn offset(&self) -> Option<f64> {
        self.snapshot().map(|m| m.offset)
    }

    /// Decision score for one vector; neutral 0.0 before training.
    pub fn score(&self, vector: &FeatureVector) -> f64 {
        match self.snapshot() {
            Some(model) => model.score(vector),
            None => 0.0,
        }
    }

    /// True iff a model is trained and the decision score is strictly
    /// negative.
    pub fn is_anomalous(&self, score: f64) -> bool {
        self.is_trained() && score < 0.0
    }

    /// Score and flag from one snapshot.
    pub fn evaluate(&self, vector: &FeatureVector) -> MlVerdict {
        match self.snapshot() {
            Some(model) => {
                let score = model.score(vector);
                MlVerdict {
                    score,
                    is_anomaly: score < 0.0,
                }
            }
            None => MlVerdict::neutral(),
        }
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

/// Linear-interpolated percentile over an ascending-sorted slice, `q` in
/// [0, 1].
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

// ============================================================================
// TESTS
// ============================================================================
