//! Heuristic Feature Extraction
//!
//! Turns one raw event into the fixed-schema feature vector. Extraction is
//! total: malformed timestamps resolve to the invocation time, absent
//! metadata degrades to empty strings, and every layout field is always set.
//!
//! The text heuristics are deliberately simple substring predicates, kept in
//! small keyword tables so they can be swapped without touching the rest of
//! the pipeline.

use std::f64::consts::PI;

use chrono::{Datelike, Timelike, Utc};

use super::vector::{EventFeatureExtractor, FeatureVector};
use crate::event::RawEvent;

// ============================================================================
// KEYWORD TABLES
// ============================================================================

/// Event-class one-hot flags: `(feature, keywords)`. A flag is set when the
/// lower-cased event type contains any of its keywords. Flags are
/// independent; an event type can set several, or none.
pub const EVENT_CLASS_FLAGS: &[(&str, &[&str])] = &[
    ("event_type_authentication", &["auth"]),
    ("event_type_file_access", &["file"]),
    ("event_type_process_exec", &["process", "exec"]),
    ("event_type_privilege_escalation", &["privilege", "escalation"]),
];

/// Account names treated as administrative when contained in the user field.
pub const ADMIN_SUBSTRINGS: &[&str] = &["root"];

/// Source substrings treated as VPN origins.
pub const VPN_SUBSTRINGS: &[&str] = &["vpn"];

// ============================================================================
// HEURISTIC EXTRACTOR
// ============================================================================

/// Default extractor: temporal features from the event's own timestamp plus
/// substring heuristics over user, source, and event type.
#[derive(Debug, Clone, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl EventFeatureExtractor for HeuristicExtractor {
    fn extract(&self, event: &RawEvent) -> FeatureVector {
        let mut vector = FeatureVector::new();

        // --- Temporal features ---
        // The cyclic pair must come from the event's own clock, never from
        // "now": it feeds both the rule engine and the anomaly model and has
        // to be reproducible from the event alone.
        let resolved = event.timestamp.resolve(Utc::now());
        let hour = resolved.hour();
        let weekday = resolved.weekday().num_days_from_monday();
        let h = hour as f64 + resolved.minute() as f64 / 60.0;
        let angle = 2.0 * PI * h / 24.0;

        vector.set_by_name("login_hour", hour as f64);
        vector.set_by_name("day_of_week", weekday as f64);
        vector.set_by_name("is_weekend", if weekday >= 5 { 1.0 } else { 0.0 });
        vector.set_by_name("time_of_day_sin", angle.sin());
        vector.set_by_name("time_of_day_cos", angle.cos());

        // --- Identity features ---
        let user = event.metadata_str("user");
        let is_admin = user == "admin" || ADMIN_SUBSTRINGS.iter().any(|k| user.contains(k));
        vector.set_by_name("is_admin_account", if is_admin { 1.0 } else { 0.0 });
        // failed_login_count_5min / device_familiarity_score stay 0 until a
        // stateful tracker owns them.

        // --- Network features ---
        let source = event.source.to_lowercase();
        let is_vpn = VPN_SUBSTRINGS.iter().any(|k| source.contains(k));
        vector.set_by_name("is_vpn_source", if is_vpn { 1.0 } else { 0.0 });
        // geo_location_risk_score stays 0 until a geo lookup owns it.

        // --- Event class flags ---
        let event_type = event.event_type.to_lowercase();
        for (feature, keywords) in EVENT_CLASS_FLAGS {
            let hit = keywords.iter().any(|k| event_type.contains(k));
            vector.set_by_name(feature, if hit { 1.0 } else { 0.0 });
        }

        vector
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventTime;
    use serde_json::json;

    fn event_at(ts: &str) -> RawEvent {
        RawEvent {
            timestamp: EventTime::Text(ts.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_temporal_features() {
        // Saturday 10:30
        let event = event_at("2026-08-22T10:30:00");
        let v = HeuristicExtractor::new().extract(&event);

        assert_eq!(v.get_by_name("login_hour"), Some(10.0));
        assert_eq!(v.get_by_name("day_of_week"), Some(5.0));
        assert_eq!(v.get_by_name("is_weekend"), Some(1.0));

        let expected = 2.0 * PI * 10.5 / 24.0;
        assert!((v.get_by_name("time_of_day_sin").unwrap() - expected.sin()).abs() < 1e-12);
        assert!((v.get_by_name("time_of_day_cos").unwrap() - expected.cos()).abs() < 1e-12);
    }

    #[test]
    fn test_cyclic_pair_is_unit_length() {
        let extractor = HeuristicExtractor::new();
        for hour in 0..24 {
            for minute in [0, 17, 30, 59] {
                let event = event_at(&format!("2026-08-18T{:02}:{:02}:00", hour, minute));
                let v = extractor.extract(&event);
                let s = v.get_by_name("time_of_day_sin").unwrap();
                let c = v.get_by_name("time_of_day_cos").unwrap();
                assert!((s * s + c * c - 1.0).abs() < 1e-9, "h={} m={}", hour, minute);
            }
        }
    }

    #[test]
    fn test_same_hour_same_cyclic_values() {
        let extractor = HeuristicExtractor::new();
        let a = extractor.extract(&event_at("2026-03-02T14:20:00"));
        let b = extractor.extract(&event_at("2026-11-27T14:20:59"));
        assert_eq!(a.get_by_name("time_of_day_sin"), b.get_by_name("time_of_day_sin"));
        assert_eq!(a.get_by_name("time_of_day_cos"), b.get_by_name("time_of_day_cos"));
    }

    #[test]
    fn test_admin_heuristic() {
        let extractor = HeuristicExtractor::new();

        let mut event = RawEvent::default();
        event.metadata.insert("user".to_string(), json!("Admin"));
        assert_eq!(extractor.extract(&event).get_by_name("is_admin_account"), Some(1.0));

        event.metadata.insert("user".to_string(), json!("rootkit-svc"));
        assert_eq!(extractor.extract(&event).get_by_name("is_admin_account"), Some(1.0));

        event.metadata.insert("user".to_string(), json!("administrator"));
        // "administrator" != "admin" and does not contain "root"
        assert_eq!(extractor.extract(&event).get_by_name("is_admin_account"), Some(0.0));

        event.metadata.remove("user");
        assert_eq!(extractor.extract(&event).get_by_name("is_admin_account"), Some(0.0));
    }

    #[test]
    fn test_vpn_heuristic() {
        let extractor = HeuristicExtractor::new();

        let event = RawEvent {
            source: "corp-VPN-gateway-02".to_string(),
            ..Default::default()
        };
        assert_eq!(extractor.extract(&event).get_by_name("is_vpn_source"), Some(1.0));

        let event = RawEvent {
            source: "linux-server-01".to_string(),
            ..Default::default()
        };
        assert_eq!(extractor.extract(&event).get_by_name("is_vpn_source"), Some(0.0));
    }

    #[test]
    fn test_event_class_flags_independent() {
        let extractor = HeuristicExtractor::new();

        let event = RawEvent {
            event_type: "process_exec_file_write".to_string(),
            ..Default::default()
        };
        let v = extractor.extract(&event);
        assert_eq!(v.get_by_name("event_type_process_exec"), Some(1.0));
        assert_eq!(v.get_by_name("event_type_file_access"), Some(1.0));
        assert_eq!(v.get_by_name("event_type_authentication"), Some(0.0));

        let event = RawEvent {
            event_type: "heartbeat".to_string(),
            ..Default::default()
        };
        let v = extractor.extract(&event);
        for (feature, _) in EVENT_CLASS_FLAGS {
            assert_eq!(v.get_by_name(feature), Some(0.0), "{}", feature);
        }
    }

    #[test]
    fn test_extraction_is_total_on_empty_event() {
        // No timestamp, no metadata, empty strings: every field still set.
        let v = HeuristicExtractor::new().extract(&RawEvent::default());
        assert!(v.is_compatible());
        let hour = v.get_by_name("login_hour").unwrap();
        assert!((0.0..24.0).contains(&hour));
        assert_eq!(v.get_by_name("failed_login_count_5min"), Some(0.0));
        assert_eq!(v.get_by_name("device_familiarity_score"), Some(0.0));
        assert_eq!(v.get_by_name("geo_location_risk_score"), Some(0.0));
    }
}
