//! Screening reports
//!
//! What the interaction layer shows after a successful screening, plus the
//! JSON rendering used by `meditrack screen --json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DiseaseTarget, PatientObservation, RiskAssessment};

/// Completed screening with its presentation fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub patient_name: String,
    pub target: DiseaseTarget,
    pub observation: PatientObservation,
    pub assessment: RiskAssessment,
    pub completed_at: DateTime<Utc>,
}

/// Flat JSON shape for scripting
#[derive(Debug, Serialize)]
struct ReportJson<'a> {
    patient_name: &'a str,
    target: DiseaseTarget,
    target_label: &'static str,
    probability: f64,
    percent: f64,
    tier: &'static str,
    message: &'static str,
    color: &'static str,
    observation: &'a PatientObservation,
    completed_at: String,
}

impl ScreeningReport {
    pub fn new(
        patient_name: String,
        target: DiseaseTarget,
        observation: PatientObservation,
        assessment: RiskAssessment,
    ) -> Self {
        Self {
            patient_name,
            target,
            observation,
            assessment,
            completed_at: Utc::now(),
        }
    }

    /// "Prediction completed: High Risk for Diabetes."
    pub fn success_line(&self) -> String {
        format!(
            "Prediction completed: {} for {}.",
            self.assessment.tier.label(),
            self.target.label()
        )
    }

    /// "Probability: 72.0%"
    pub fn probability_line(&self) -> String {
        format!("Probability: {:.1}%", self.assessment.percent())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let tier = self.assessment.tier;
        serde_json::to_string_pretty(&ReportJson {
            patient_name: &self.patient_name,
            target: self.target,
            target_label: self.target.label(),
            probability: self.assessment.probability,
            percent: self.assessment.percent(),
            tier: tier.label(),
            message: tier.message(),
            color: tier.color_hex(),
            observation: &self.observation,
            completed_at: self.completed_at.to_rfc3339(),
        })
    }
}
