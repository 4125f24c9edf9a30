//! End-to-end screening against JSON artifacts on disk

use meditrack::{
    artifacts::{ArtifactLayout, ArtifactSource, CachedArtifactStore, FileArtifactStore},
    form::{FormOutcome, ScreeningForm},
    telemetry::TelemetryCollector,
    DiseaseTarget, PatientObservation, RiskEvaluator, RiskTier, ScreeningError,
};
use std::path::Path;
use tempfile::TempDir;

fn observation() -> PatientObservation {
    PatientObservation {
        age: 30,
        bmi: 22.0,
        glucose: 90.0,
        blood_pressure: 120.0,
        heart_rate: 72,
        temperature: 98.6,
    }
}

/// Vectorizer over all six vitals, standardized
fn write_vectorizer(dir: &Path, target: &str) {
    let json = r#"{
        "feature_names": ["Age", "BMI", "BP", "Glucose", "HR", "Temp"],
        "scaler": {
            "mean": [30.0, 22.0, 120.0, 90.0, 72.0, 98.6],
            "scale": [10.0, 4.0, 15.0, 25.0, 12.0, 0.8]
        }
    }"#;
    std::fs::write(dir.join(format!("{}_vectorizer.json", target)), json).unwrap();
}

fn write_model(dir: &Path, target: &str, body: &str) {
    std::fs::write(dir.join(format!("{}_calibrated_model.json", target)), body).unwrap();
}

#[test]
fn test_screening_with_logistic_model() {
    let dir = TempDir::new().unwrap();
    write_vectorizer(dir.path(), "diabetes");
    // The observation sits on the scaler means, so only the intercept counts
    write_model(
        dir.path(),
        "diabetes",
        r#"{"members": [{"coefficients": [0.3, 0.5, 0.2, 0.9, 0.1, 0.05], "intercept": -1.7346}]}"#,
    );

    let evaluator = RiskEvaluator::new(FileArtifactStore::new(ArtifactLayout::new(dir.path())));
    let assessment = evaluator.evaluate(DiseaseTarget::Diabetes, &observation()).unwrap();

    // logistic(-1.7346) ~= 0.15
    assert!((assessment.probability - 0.15).abs() < 1e-3);
    assert_eq!(assessment.tier, RiskTier::Low);
}

#[test]
fn test_screening_with_isotonic_folds() {
    let dir = TempDir::new().unwrap();
    write_vectorizer(dir.path(), "heart");
    write_model(
        dir.path(),
        "heart",
        r#"{
            "classes": [0, 1],
            "members": [
                {"coefficients": [0, 0, 0, 0, 0, 0], "intercept": 1.0,
                 "calibration": {"method": "isotonic", "x": [-2.0, 0.0, 2.0], "y": [0.1, 0.5, 0.9]}},
                {"coefficients": [0, 0, 0, 0, 0, 0], "intercept": 2.0,
                 "calibration": {"method": "isotonic", "x": [-2.0, 0.0, 2.0], "y": [0.1, 0.5, 0.9]}}
            ]
        }"#,
    );

    let evaluator = RiskEvaluator::new(FileArtifactStore::new(ArtifactLayout::new(dir.path())));
    let assessment = evaluator.evaluate(DiseaseTarget::Heart, &observation()).unwrap();

    // Folds give 0.7 and 0.9
    assert!((assessment.probability - 0.8).abs() < 1e-9);
    assert_eq!(assessment.tier, RiskTier::High);
}

#[test]
fn test_platt_calibrated_moderate() {
    let dir = TempDir::new().unwrap();
    write_vectorizer(dir.path(), "breast");
    write_model(
        dir.path(),
        "breast",
        r#"{"members": [{"coefficients": [1, 1, 1, 1, 1, 1], "intercept": 0.0,
            "calibration": {"method": "sigmoid", "a": -1.0, "b": 0.0}}]}"#,
    );

    let evaluator = RiskEvaluator::new(FileArtifactStore::new(ArtifactLayout::new(dir.path())));
    let assessment = evaluator.evaluate(DiseaseTarget::Breast, &observation()).unwrap();
    assert!((assessment.probability - 0.5).abs() < 1e-9);
    assert_eq!(assessment.tier, RiskTier::Moderate);
}

#[test]
fn test_feature_mismatch_reported_as_failure() {
    let dir = TempDir::new().unwrap();
    write_vectorizer(dir.path(), "diabetes");
    write_model(
        dir.path(),
        "diabetes",
        r#"{"members": [{"coefficients": [0.3, 0.5], "intercept": 0.0}]}"#,
    );

    let evaluator = RiskEvaluator::new(FileArtifactStore::new(ArtifactLayout::new(dir.path())));
    let form = ScreeningForm {
        certified: true,
        ..ScreeningForm::default()
    };
    match form.submit(&evaluator) {
        FormOutcome::Failed { target, error } => {
            assert_eq!(target, DiseaseTarget::Diabetes);
            assert!(error.is_evaluation_failure());
        }
        other => panic!("expected failed outcome, got {:?}", other),
    }
}

#[test]
fn test_missing_kidney_artifacts() {
    let dir = TempDir::new().unwrap();
    write_vectorizer(dir.path(), "diabetes");
    write_model(dir.path(), "diabetes", r#"{"members": [{"coefficients": [0,0,0,0,0,0], "intercept": 0.0}]}"#);

    let evaluator = RiskEvaluator::new(FileArtifactStore::new(ArtifactLayout::new(dir.path())));
    let err = evaluator
        .evaluate(DiseaseTarget::Kidney, &observation())
        .unwrap_err();
    assert!(matches!(err, ScreeningError::ArtifactNotFound { .. }));

    // Other targets keep working
    assert!(evaluator.evaluate(DiseaseTarget::Diabetes, &observation()).is_ok());
}

#[test]
fn test_cached_store_reads_files_once() {
    let dir = TempDir::new().unwrap();
    write_vectorizer(dir.path(), "heart");
    write_model(dir.path(), "heart", r#"{"members": [{"coefficients": [0,0,0,0,0,0], "intercept": 0.0}]}"#);

    let cache = CachedArtifactStore::new(FileArtifactStore::new(ArtifactLayout::new(dir.path())));
    cache.load(DiseaseTarget::Heart).unwrap();

    // Served from memory once cached
    std::fs::remove_file(dir.path().join("heart_vectorizer.json")).unwrap();
    assert!(cache.load(DiseaseTarget::Heart).is_ok());
    assert_eq!(cache.cached_targets(), vec![DiseaseTarget::Heart]);
}

#[tokio::test]
async fn test_async_submission_records_telemetry() {
    let dir = TempDir::new().unwrap();
    write_vectorizer(dir.path(), "diabetes");
    write_model(dir.path(), "diabetes", r#"{"members": [{"coefficients": [0,0,0,0,0,0], "intercept": 2.0}]}"#);

    let telemetry = TelemetryCollector::new();
    let evaluator = RiskEvaluator::new(FileArtifactStore::new(ArtifactLayout::new(dir.path())))
        .with_telemetry(telemetry.clone());

    let certified = ScreeningForm {
        certified: true,
        ..ScreeningForm::default()
    };
    let outcome = certified.submit_async(&evaluator).await;
    assert_eq!(outcome.message(), "Prediction completed: High Risk for Diabetes.");

    let uncertified = ScreeningForm::default().submit_async(&evaluator).await;
    assert!(matches!(uncertified, FormOutcome::NotCertified));

    let stats = telemetry.get_stats();
    assert_eq!(stats.succeeded, 1);
    assert_eq!(stats.high, 1);
    assert_eq!(stats.blocked, 1);
}
