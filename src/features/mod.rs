//! Features Module - Feature Extraction Engine
//!
//! Fixed-schema numeric encoding of raw events. The layout is the single
//! source of truth; extraction is total and reproducible from the event
//! alone.

pub mod extract;
pub mod layout;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use extract::HeuristicExtractor;
pub use layout::{feature_index, feature_name, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::{EventFeatureExtractor, FeatureVector};
