//! Isolation Forest
//!
//! Ensemble of randomized partitioning trees. Each tree recursively splits a
//! random sample of the training vectors on a random feature/threshold until
//! subsets are singletons, constant, or a depth limit is reached. Points that
//! isolate in fewer splits are easier to separate from the bulk of the data
//! and score as more anomalous.
//!
//! Score shape follows the classic formulation: raw measure
//! `s(x) = 2^(-E[h(x)] / c(psi))` in (0, 1], sample score `-s(x)` so that
//! lower means more anomalous. The detector re-centers sample scores against
//! a trained offset; the forest itself carries no decision boundary.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// CONFIG
// ============================================================================

/// Isolation forest hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub trees: usize,
    /// Sub-sample size per tree (psi)
    pub sample_size: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            sample_size: 256,
        }
    }
}

// ============================================================================
// TREE
// ============================================================================

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

#[derive(Debug, Clone)]
struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    /// Build a tree over the rows selected by `indices`.
    fn build(data: &[Vec<f64>], indices: &[usize], depth_limit: usize, rng: &mut StdRng) -> Self {
        Self {
            root: build_node(data, indices, 0, depth_limit, rng),
        }
    }

    /// Isolation depth of `row`, with the unsuccessful-search correction at
    /// the leaf standing in for the subtree that was not grown.
    fn path_length(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        let mut depth = 0.0;
        loop {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    depth += 1.0;
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    node = if value < *threshold { left } else { right };
                }
                Node::Leaf { size } => return depth + average_path_length(*size),
            }
        }
    }
}

fn build_node(
    data: &[Vec<f64>],
    indices: &[usize],
    depth: usize,
    depth_limit: usize,
    rng: &mut StdRng,
) -> Node {
    if indices.len() <= 1 || depth >= depth_limit {
        return Node::Leaf { size: indices.len() };
    }

    // Candidate features are those with spread over this subset.
    let dims = data[indices[0]].len();
    let mut candidates = Vec::new();
    for feature in 0..dims {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &i in indices.iter() {
            let v = data[i][feature];
            min = min.min(v);
            max = max.max(v);
        }
        if max > min {
            candidates.push((feature, min, max));
        }
    }
    if candidates.is_empty() {
        // All remaining points identical
        return Node::Leaf { size: indices.len() };
    }

    let (feature, min, max) = candidates[rng.gen_range(0..candidates.len())];
    let threshold = rng.gen_range(min..max);

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) =
        indices.iter().copied().partition(|&i| data[i][feature] < threshold);

    // A threshold strictly inside (min, max) always separates at least one
    // point to each side, but guard against degenerate float behavior.
    if left_idx.is_empty() || right_idx.is_empty() {
        return Node::Leaf { size: indices.len() };
    }

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_node(data, &left_idx, depth + 1, depth_limit, rng)),
        right: Box::new(build_node(data, &right_idx, depth + 1, depth_limit, rng)),
    }
}

// ============================================================================
// PATH-LENGTH CORRECTION
// ============================================================================

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Average path length of an unsuccessful BST search over `n` points:
/// `c(n) = 2 H(n-1) - 2(n-1)/n`, with the harmonic number approximated by
/// `ln(i) + gamma`.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

// ============================================================================
// FOREST
// ============================================================================

/// Trained ensemble. Scoring is deterministic; all randomness is consumed at
/// build time from the caller-supplied seeded RNG.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    /// Effective sub-sample size used per tree
    sample_size: usize,
}

impl IsolationForest {
    /// Fit an ensemble on `data`. Every row must have the same width.
    /// Panics on an empty batch; the detector validates emptiness first.
    pub fn fit(data: &[Vec<f64>], config: &ForestConfig, rng: &mut StdRng) -> Self {
        assert!(!data.is_empty(), "isolation forest requires at least one row");

        let sample_size = config.sample_size.min(data.len()).max(2);
        let depth_limit = (sample_size as f64).log2().ceil() as usize;

        let trees = (0..config.trees.max(1))
            .map(|_| {
                let indices = sample_indices(data.len(), sample_size, rng);
                IsolationTree::build(data, &indices, depth_limit, rng)
            })
            .collect();

        Self { trees, sample_size }
    }

    /// Raw anomaly measure in (0, 1]; higher = more anomalous.
    fn measure(&self, row: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.path_length(row)).sum();
        let mean_depth = total / self.trees.len() as f64;
        let c = average_path_length(self.sample_size).max(1.0);
        2f64.powf(-mean_depth / c)
    }

    /// Sample score `-measure` in [-1, 0); lower means more anomalous. No
    /// decision boundary at this level - the detector subtracts a trained
    /// offset so that 0 separates inliers from anomalies.
    pub fn score_samples(&self, row: &[f64]) -> f64 {
        -self.measure(row)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

/// Sample `amount` distinct row indices without replacement.
fn sample_indices(len: usize, amount: usize, rng: &mut StdRng) -> Vec<usize> {
    if amount >= len {
        (0..len).collect()
    } else {
        rand::seq::index::sample(rng, len, amount).into_vec()
    }
}

// ============================================================================
// TESTS
// ============================================================================
