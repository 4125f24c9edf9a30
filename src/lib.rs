//! MediTrack - clinical risk screening
//!
//! Loads a pre-trained vectorizer and calibrated classifier per disease
//! target, scores a patient's vitals and buckets the probability into a
//! Low / Moderate / High risk tier.
//!
//! # Architecture
//!
//! - **types**: observation, disease targets, assessments
//! - **artifacts**: artifact traits, file formats and stores
//! - **evaluator**: the single evaluate operation
//! - **form / report / display**: the terminal interaction surface

pub mod errors;
pub mod types;
pub mod artifacts;
pub mod evaluator;

// Re-export commonly used types
pub use errors::{Result, ScreeningError};
pub use evaluator::RiskEvaluator;
pub use types::{DiseaseTarget, PatientObservation, RiskAssessment, RiskTier};

// Interaction surface
pub mod form;
pub mod report;
pub mod display;

// Ambient services
pub mod cli;
pub mod telemetry;
pub mod doctor;
