//! Type definitions module
//!
//! Core screening types: the patient observation, disease targets and the
//! resulting risk assessment.

pub mod observation;
pub mod target;
pub mod assessment;

// Re-export commonly used types
pub use observation::{FeatureVector, PatientObservation, FEATURE_KEYS};
pub use target::DiseaseTarget;
pub use assessment::{RiskAssessment, RiskTier, HIGH_RISK_THRESHOLD, MODERATE_RISK_THRESHOLD};
