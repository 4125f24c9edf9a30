//! Error types for MediTrack screening
//!
//! Every failure is recoverable at the request boundary: a failed screening
//! produces a message for the user and leaves no shared state behind.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::DiseaseTarget;

/// Main error type for the screening system
#[derive(Error, Debug)]
pub enum ScreeningError {
    /// Artifact pair missing for a target
    #[error("Artifact not found for {target}: {}", path.display())]
    ArtifactNotFound { target: DiseaseTarget, path: PathBuf },

    /// Artifact present but unreadable or malformed
    #[error("Artifact {} is corrupt: {reason}", path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    /// Vectorizer rejected the observation
    #[error("Feature transform failed: {0}")]
    TransformError(String),

    /// Classifier rejected the feature vector
    #[error("Inference failed: {0}")]
    InferenceError(String),

    /// Caller contract violation (unknown target, out-of-range field)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for screening operations
pub type Result<T> = std::result::Result<T, ScreeningError>;

impl ScreeningError {
    /// Failures raised by the artifacts themselves while evaluating.
    /// Transform and inference failures are reported to the user the same way.
    pub fn is_evaluation_failure(&self) -> bool {
        matches!(
            self,
            ScreeningError::TransformError(_) | ScreeningError::InferenceError(_)
        )
    }
}

impl From<candle_core::Error> for ScreeningError {
    fn from(err: candle_core::Error) -> Self {
        ScreeningError::InferenceError(err.to_string())
    }
}
