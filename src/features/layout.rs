//! Feature Layout - Centralized Feature Schema
//!
//! Single source of truth for the per-event feature vector: the field names,
//! their order, and a CRC32 layout hash used to detect schema drift between
//! a trained model and the vectors fed to it.
//!
//! Changing the name list in any way (add, remove, reorder) requires bumping
//! `FEATURE_VERSION`.

use crc32fast::Hasher;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version.
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT
// ============================================================================

/// Feature names in the exact order they appear in the vector.
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Temporal (0-4) ===
    "login_hour",       // 0: Hour of day the event occurred (0-23)
    "day_of_week",      // 1: Weekday index, Monday=0 .. Sunday=6
    "is_weekend",       // 2: 1 if weekday >= 5
    "time_of_day_sin",  // 3: sin(2*pi*h/24), h = hour + minute/60
    "time_of_day_cos",  // 4: cos(2*pi*h/24)

    // === Identity (5-7) ===
    "is_admin_account",          // 5: Admin heuristic on metadata.user
    "failed_login_count_5min",   // 6: Reserved for stateful tracking, always 0
    "device_familiarity_score",  // 7: Reserved for device history, always 0

    // === Network (8-9) ===
    "is_vpn_source",           // 8: VPN heuristic on the event source
    "geo_location_risk_score", // 9: Reserved for geo lookup, always 0

    // === Event class one-hot (10-13) ===
    "event_type_authentication",       // 10
    "event_type_file_access",          // 11
    "event_type_process_exec",         // 12
    "event_type_privilege_escalation", // 13
];

/// Total number of features. Must match `FEATURE_LAYOUT.len()`.
pub const FEATURE_COUNT: usize = 14;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 hash of the feature layout, used to detect mismatches at runtime.
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }
    hasher.finalize()
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a feature vector's layout does not match the current schema.
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version, self.expected_hash, self.actual_version, self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that incoming data matches the current layout.
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();
    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }
    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few).
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index.
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================
