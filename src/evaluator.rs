//! Risk evaluator
//!
//! Resolves the artifact pair for a target, maps the observation into
//! feature space, asks the calibrated model for the positive-class
//! probability and buckets it into a tier. Stateless apart from whatever
//! caching the artifact source does.

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

use crate::artifacts::ArtifactSource;
use crate::errors::{Result, ScreeningError};
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use crate::types::{DiseaseTarget, PatientObservation, RiskAssessment};

/// Evaluates observations against per-target artifacts
#[derive(Clone)]
pub struct RiskEvaluator {
    source: Arc<dyn ArtifactSource>,
    telemetry: Option<TelemetryCollector>,
}

impl RiskEvaluator {
    pub fn new(source: impl ArtifactSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            telemetry: None,
        }
    }

    /// Record load and evaluation events into `telemetry`
    pub fn with_telemetry(mut self, telemetry: TelemetryCollector) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    pub fn telemetry(&self) -> Option<&TelemetryCollector> {
        self.telemetry.as_ref()
    }

    fn record(&self, event: TelemetryEvent) {
        if let Some(telemetry) = &self.telemetry {
            telemetry.record(event);
        }
    }

    /// Evaluate one observation.
    ///
    /// The observation is only borrowed; the caller owns it before and after.
    /// Observation ranges are the caller's responsibility.
    pub fn evaluate(
        &self,
        target: DiseaseTarget,
        observation: &PatientObservation,
    ) -> Result<RiskAssessment> {
        let started = Instant::now();
        let result = self.run(target, observation);
        let duration_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(assessment) => {
                info!(
                    "{} screening: p={:.4} tier={:?} ({}ms)",
                    target, assessment.probability, assessment.tier, duration_ms
                );
                self.record(TelemetryEvent::EvaluationCompleted {
                    target,
                    tier: assessment.tier,
                    probability: assessment.probability,
                    duration_ms,
                    timestamp: Instant::now(),
                });
            }
            Err(e) => {
                warn!("{} screening failed: {}", target, e);
                self.record(TelemetryEvent::EvaluationFailed {
                    target,
                    error: e.to_string(),
                    timestamp: Instant::now(),
                });
            }
        }
        result
    }

    fn run(&self, target: DiseaseTarget, observation: &PatientObservation) -> Result<RiskAssessment> {
        let load_started = Instant::now();
        let pair = self.source.load(target)?;
        self.record(TelemetryEvent::ArtifactsLoaded {
            target,
            duration_ms: load_started.elapsed().as_millis() as u64,
            timestamp: Instant::now(),
        });

        let features = pair.vectorizer.transform(observation)?;
        debug!("{} features: {:?}", target, features.values());

        let probability = pair.classifier.predict_probability(&features)?;
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(ScreeningError::InferenceError(format!(
                "model returned probability {} outside [0, 1]",
                probability
            )));
        }
        Ok(RiskAssessment::from_probability(probability))
    }

    /// Run `evaluate` on the blocking pool so an async caller stays responsive
    pub async fn evaluate_blocking(
        &self,
        target: DiseaseTarget,
        observation: PatientObservation,
    ) -> Result<RiskAssessment> {
        let evaluator = self.clone();
        tokio::task::spawn_blocking(move || evaluator.evaluate(target, &observation))
            .await
            .map_err(|e| {
                ScreeningError::InferenceError(format!(
                    "evaluation task failed: {}",
                    e
                ))
            })?
    }
}
