//! Integration tests for the feature extraction modules.

mod integration_tests {
    use crate::event::{EventTime, RawEvent};
    use crate::features::{
        EventFeatureExtractor, FeatureVector, HeuristicExtractor, FEATURE_COUNT, FEATURE_LAYOUT,
    };
    use serde_json::json;

    /// Extraction always yields the full fixed field set, matching the layout.
    #[test]
    fn test_extraction_covers_full_layout() {
        let event = RawEvent {
            timestamp: EventTime::Text("2026-08-18T09:15:00".to_string()),
            source: "vpn-gateway".to_string(),
            event_type: "authentication".to_string(),
            message: "login ok".to_string(),
            metadata: [("user".to_string(), json!("admin"))].into_iter().collect(),
        };

        let v = HeuristicExtractor::new().extract(&event);
        assert_eq!(v.values.len(), FEATURE_COUNT);
        for name in FEATURE_LAYOUT {
            assert!(v.get_by_name(name).is_some(), "missing field {}", name);
        }
    }

    /// A vector survives a serde round trip through the persisted-blob shape.
    #[test]
    fn test_vector_serde_round_trip() {
        let event = RawEvent {
            timestamp: EventTime::Text("2026-08-22T03:00:00".to_string()),
            source: "workstation-7".to_string(),
            event_type: "process_exec".to_string(),
            ..Default::default()
        };
        let v = HeuristicExtractor::new().extract(&event);

        let blob = serde_json::to_string(&v).unwrap();
        let back: FeatureVector = serde_json::from_str(&blob).unwrap();
        assert_eq!(back, v);
        assert!(back.is_compatible());
    }

    /// Two events with identical wall-clock times produce identical temporal
    /// features, whatever the current time is.
    #[test]
    fn test_temporal_features_reproducible() {
        let make = || RawEvent {
            timestamp: EventTime::Text("2026-08-22T10:00:00".to_string()),
            event_type: "authentication".to_string(),
            metadata: [("user".to_string(), json!("admin"))].into_iter().collect(),
            ..Default::default()
        };

        let extractor = HeuristicExtractor::new();
        let a = extractor.extract(&make());
        let b = extractor.extract(&make());
        assert_eq!(a, b);
    }
}
