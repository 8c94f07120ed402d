//! End-to-end pipeline scenarios through the public API: ingest, train,
//! re-score, report.

use serde_json::json;
use soclite_core::{
    DetectionPipeline, DetectorConfig, EventTime, FeatureVector, PipelineError, RawEvent, Severity,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn event(ts: &str, user: &str, event_type: &str, message: &str) -> RawEvent {
    RawEvent {
        timestamp: EventTime::Text(ts.to_string()),
        source: "linux-server-01".to_string(),
        event_type: event_type.to_string(),
        message: message.to_string(),
        metadata: [
            ("user".to_string(), json!(user)),
            ("ip_address".to_string(), json!("10.0.0.5")),
        ]
        .into_iter()
        .collect(),
    }
}

/// Weekday business-hours logins by a regular user, the training baseline.
fn baseline_corpus(pipeline: &DetectionPipeline) -> Vec<FeatureVector> {
    let mut corpus = Vec::new();
    // Mon 2026-08-03 .. Fri 2026-08-28, hourly 08:00-17:00.
    for day in 3..=28 {
        let date = format!("2026-08-{:02}", day);
        for hour in 8..18 {
            let ts = format!("{}T{:02}:00:00", date, hour);
            let raw = event(&ts, "alice", "authentication", "User 'alice' logged in");
            let features = pipeline.extract_features(&raw);
            // Skip weekends so the baseline is genuinely weekday-only.
            if features.get_by_name("is_weekend") == Some(0.0) {
                corpus.push(features);
            }
        }
    }
    corpus
}

#[test]
fn test_admin_weekend_login_is_flagged() {
    init_logging();
    let pipeline = DetectionPipeline::new();

    // Saturday 2026-08-22 10:00, admin account.
    let scored = pipeline.process(event(
        "2026-08-22T10:00:00",
        "admin",
        "authentication",
        "User 'admin' logged in",
    ));

    assert!(scored.is_anomaly);
    assert!(scored.is_anomaly_rule);
    let names: Vec<&str> = scored.matched_rules.iter().map(|m| m.name.as_str()).collect();
    assert!(names.contains(&"Admin Login on Weekend"));
    // Critical rule pushes the fused score out of the Low tier.
    assert!(scored.final_risk_score > 30.0);
    assert!(scored.severity >= Severity::Medium);
}

#[test]
fn test_routine_login_stays_low_after_training() {
    init_logging();
    let pipeline = DetectionPipeline::new();
    let corpus = baseline_corpus(&pipeline);
    assert!(corpus.len() > 100);
    pipeline.train(&corpus).unwrap();

    // Tuesday 2026-08-18 09:00, squarely inside the baseline.
    let scored = pipeline.process(event(
        "2026-08-18T09:00:00",
        "alice",
        "authentication",
        "User 'alice' logged in",
    ));

    assert!(scored.matched_rules.is_empty());
    assert!(!scored.is_anomaly_ml);
    assert!(!scored.is_anomaly);
    // A point the model trained on scores at or above the 0 boundary, so
    // the fused risk cannot leave the low band.
    assert!(
        scored.anomaly_score_ml >= 0.0,
        "ml score {}",
        scored.anomaly_score_ml
    );
    assert!(
        scored.final_risk_score <= 30.0,
        "final risk {}",
        scored.final_risk_score
    );
    assert_eq!(scored.severity, Severity::Low);
}

#[test]
fn test_off_hours_outlier_scores_lower_than_baseline() {
    let pipeline = DetectionPipeline::new();
    let corpus = baseline_corpus(&pipeline);
    pipeline.train(&corpus).unwrap();

    let routine = pipeline.extract_features(&event(
        "2026-08-18T09:00:00",
        "alice",
        "authentication",
        "User 'alice' logged in",
    ));
    // Sunday 03:00 admin process execution: far from everything trained on.
    let outlier = pipeline.extract_features(&event(
        "2026-08-23T03:00:00",
        "root",
        "process_execution",
        "Process '/tmp/x' spawned by root",
    ));

    let routine_eval = pipeline.score_and_evaluate(&routine);
    let outlier_eval = pipeline.score_and_evaluate(&outlier);

    // Lower score means more anomalous.
    assert!(outlier_eval.anomaly_score < routine_eval.anomaly_score);
    assert!(outlier_eval.final_risk_score > routine_eval.final_risk_score);
}

#[test]
fn test_scoring_is_deterministic_for_a_trained_model() {
    let pipeline = DetectionPipeline::new();
    let corpus = baseline_corpus(&pipeline);
    pipeline.train(&corpus).unwrap();

    let features = pipeline.extract_features(&event(
        "2026-08-23T03:00:00",
        "root",
        "process_execution",
        "Process '/tmp/x' spawned by root",
    ));
    let a = pipeline.score_and_evaluate(&features);
    let b = pipeline.score_and_evaluate(&features);
    assert_eq!(a.anomaly_score, b.anomaly_score);
    assert_eq!(a.final_risk_score, b.final_risk_score);
}

#[test]
fn test_training_with_fixed_seed_is_reproducible() {
    let config = DetectorConfig {
        seed: 7,
        ..DetectorConfig::default()
    };
    let first = DetectionPipeline::builder().detector_config(config.clone()).build();
    let second = DetectionPipeline::builder().detector_config(config).build();

    let corpus = baseline_corpus(&first);
    first.train(&corpus).unwrap();
    second.train(&corpus).unwrap();

    let probe = first.extract_features(&event(
        "2026-08-23T03:00:00",
        "root",
        "process_execution",
        "Process '/tmp/x' spawned by root",
    ));
    assert_eq!(
        first.score_and_evaluate(&probe).anomaly_score,
        second.score_and_evaluate(&probe).anomaly_score
    );
}

#[test]
fn test_training_rejects_empty_corpus() {
    let pipeline = DetectionPipeline::new();
    let err = pipeline.train(&[]).unwrap_err();
    assert!(matches!(err, PipelineError::InsufficientData));
}

#[test]
fn test_report_generation_end_to_end() {
    let pipeline = DetectionPipeline::new();

    let flagged = pipeline.process(event(
        "2026-08-22T10:00:00",
        "admin",
        "authentication",
        "User 'admin' logged in",
    ));
    assert!(flagged.is_anomaly);

    let report = pipeline.generate_report(&flagged).unwrap();
    assert_eq!(report.incident_id, flagged.id);
    assert!(report.summary.contains("linux-server-01"));
    assert!(report
        .detailed_explanation
        .contains("Admin Login on Weekend"));
    assert!(report.recommended_actions.iter().any(|a| a.contains("10.0.0.5")));

    let clean = pipeline.process(event(
        "2026-08-18T09:00:00",
        "alice",
        "authentication",
        "User 'alice' logged in",
    ));
    assert!(pipeline.generate_report(&clean).is_err());
}
