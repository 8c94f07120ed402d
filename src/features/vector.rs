//! Feature Vector - Fixed-schema numeric encoding of one event
//!
//! Versioned vector with layout validation. Every vector fed to training or
//! scoring carries the layout version and hash so schema drift is caught
//! instead of silently mis-scoring.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::layout::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};
use crate::event::RawEvent;

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Ordered, fixed-schema feature vector with layout metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in the order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with the current layout.
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    /// Create from raw values with the current layout.
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Create from named values. Missing fields default to 0, unknown fields
    /// are ignored, so callers with an older or wider field set still produce
    /// a well-formed vector.
    pub fn from_named(named: &HashMap<String, f64>) -> Self {
        let mut vector = Self::new();
        for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
            vector.values[i] = named.get(*name).copied().unwrap_or(0.0);
        }
        vector
    }

    /// Get feature by index.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name.
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by index.
    pub fn set(&mut self, index: usize, value: f64) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Set feature by name. Returns false for names outside the layout.
    pub fn set_by_name(&mut self, name: &str, value: f64) -> bool {
        if let Some(index) = super::layout::feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    /// Validate that this vector matches the current layout.
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    /// Feature names for this vector, in order.
    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }

    /// JSON projection for structured logging.
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<HashMap<_, _>>(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// FEATURE EXTRACTOR TRAIT
// ============================================================================

/// Capability interface for turning a raw event into a feature vector.
///
/// Extraction is total: implementations degrade malformed input to documented
/// defaults and never fail.
pub trait EventFeatureExtractor: Send + Sync {
    fn extract(&self, event: &RawEvent) -> FeatureVector;
}

// ============================================================================
// TESTS
// ============================================================================
