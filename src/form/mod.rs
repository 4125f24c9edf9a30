//! Screening form
//!
//! The form owns the input rules the evaluator trusts: the certification
//! gate, a known screening target, and every vital inside its range.

pub mod prompt;

pub use prompt::FormPrompter;

use std::time::Instant;

use crate::errors::{Result, ScreeningError};
use crate::evaluator::RiskEvaluator;
use crate::report::ScreeningReport;
use crate::telemetry::TelemetryEvent;
use crate::types::{DiseaseTarget, PatientObservation};

/// Shown when the form is submitted without certification
pub const CERTIFY_PROMPT: &str = "Please certify your input before submitting.";

/// Inclusive bounds for one numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    fn check(&self, value: f64) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(ScreeningError::InvalidInput(format!(
                "{} {} out of range [{}, {}]",
                self.label, value, self.min, self.max
            )))
        }
    }
}

pub const AGE_RANGE: FieldRange = FieldRange { label: "Age", min: 1.0, max: 120.0 };
pub const BMI_RANGE: FieldRange = FieldRange { label: "BMI", min: 10.0, max: 50.0 };
pub const GLUCOSE_RANGE: FieldRange = FieldRange { label: "Glucose Level", min: 40.0, max: 350.0 };
pub const BP_RANGE: FieldRange = FieldRange { label: "Blood Pressure", min: 40.0, max: 220.0 };
pub const HR_RANGE: FieldRange = FieldRange { label: "Heart Rate", min: 30.0, max: 240.0 };
pub const TEMP_RANGE: FieldRange = FieldRange { label: "Body Temp (°F)", min: 94.0, max: 105.0 };

/// Values a fresh form starts with
#[derive(Debug, Clone, Copy)]
pub struct FormDefaults {
    pub age: u32,
    pub target: DiseaseTarget,
    pub bmi: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub heart_rate: u32,
    pub temperature: f64,
}

pub const FORM_DEFAULTS: FormDefaults = FormDefaults {
    age: 30,
    target: DiseaseTarget::Diabetes,
    bmi: 22.0,
    glucose: 90.0,
    blood_pressure: 120.0,
    heart_rate: 72,
    temperature: 98.6,
};

/// Everything the user entered
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningForm {
    /// Display only; never passed to the evaluator
    pub name: String,
    pub age: u32,
    /// Target as entered; parsed on submit
    pub target: String,
    pub bmi: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub heart_rate: u32,
    pub temperature: f64,
    pub certified: bool,
}

impl Default for ScreeningForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: FORM_DEFAULTS.age,
            target: FORM_DEFAULTS.target.short_name().to_string(),
            bmi: FORM_DEFAULTS.bmi,
            glucose: FORM_DEFAULTS.glucose,
            blood_pressure: FORM_DEFAULTS.blood_pressure,
            heart_rate: FORM_DEFAULTS.heart_rate,
            temperature: FORM_DEFAULTS.temperature,
            certified: false,
        }
    }
}

/// Result of submitting the form
#[derive(Debug)]
pub enum FormOutcome {
    /// Certification missing; nothing was evaluated
    NotCertified,
    /// Unknown target or out-of-range field; nothing was evaluated
    Rejected(ScreeningError),
    /// The evaluator ran and failed
    Failed {
        target: DiseaseTarget,
        error: ScreeningError,
    },
    Completed(ScreeningReport),
}

impl FormOutcome {
    /// Text shown to the user
    pub fn message(&self) -> String {
        match self {
            FormOutcome::NotCertified => CERTIFY_PROMPT.to_string(),
            FormOutcome::Rejected(error) => error.to_string(),
            FormOutcome::Failed { error, .. } => format!("Prediction failed: {}", error),
            FormOutcome::Completed(report) => report.success_line(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormOutcome::Completed(_))
    }
}

impl ScreeningForm {
    /// Resolve the target name; unknown names are rejected here
    pub fn parse_target(&self) -> Result<DiseaseTarget> {
        self.target.parse()
    }

    /// Range-check every vital and build the observation
    pub fn observation(&self) -> Result<PatientObservation> {
        AGE_RANGE.check(f64::from(self.age))?;
        BMI_RANGE.check(self.bmi)?;
        GLUCOSE_RANGE.check(self.glucose)?;
        BP_RANGE.check(self.blood_pressure)?;
        HR_RANGE.check(f64::from(self.heart_rate))?;
        TEMP_RANGE.check(self.temperature)?;

        Ok(PatientObservation {
            age: self.age,
            bmi: self.bmi,
            glucose: self.glucose,
            blood_pressure: self.blood_pressure,
            heart_rate: self.heart_rate,
            temperature: self.temperature,
        })
    }

    /// Target and observation ready for the evaluator
    pub fn prepare(&self) -> Result<(DiseaseTarget, PatientObservation)> {
        let target = self.parse_target()?;
        let observation = self.observation()?;
        Ok((target, observation))
    }

    fn gate(&self, evaluator: &RiskEvaluator) -> std::result::Result<(DiseaseTarget, PatientObservation), FormOutcome> {
        if !self.certified {
            if let Some(telemetry) = evaluator.telemetry() {
                telemetry.record(TelemetryEvent::SubmissionBlocked {
                    timestamp: Instant::now(),
                });
            }
            return Err(FormOutcome::NotCertified);
        }
        self.prepare().map_err(FormOutcome::Rejected)
    }

    fn finish(
        &self,
        target: DiseaseTarget,
        observation: PatientObservation,
        result: Result<crate::types::RiskAssessment>,
    ) -> FormOutcome {
        match result {
            Ok(assessment) => FormOutcome::Completed(ScreeningReport::new(
                self.name.clone(),
                target,
                observation,
                assessment,
            )),
            Err(error) => FormOutcome::Failed { target, error },
        }
    }

    /// Submit synchronously
    pub fn submit(&self, evaluator: &RiskEvaluator) -> FormOutcome {
        match self.gate(evaluator) {
            Ok((target, observation)) => {
                let result = evaluator.evaluate(target, &observation);
                self.finish(target, observation, result)
            }
            Err(outcome) => outcome,
        }
    }

    /// Submit with the evaluation moved off the async runtime's worker
    pub async fn submit_async(&self, evaluator: &RiskEvaluator) -> FormOutcome {
        match self.gate(evaluator) {
            Ok((target, observation)) => {
                let result = evaluator.evaluate_blocking(target, observation).await;
                self.finish(target, observation, result)
            }
            Err(outcome) => outcome,
        }
    }
}
