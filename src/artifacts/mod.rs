//! Screening artifacts
//!
//! A target's artifact pair is a feature transformer and a calibrated
//! probability model. Both are produced by an external training pipeline and
//! only ever read here. The evaluator talks to them through the traits below
//! so tests can swap in deterministic stubs.

pub mod layout;
pub mod vectorizer;
pub mod calibrated;
pub mod store;

pub use layout::ArtifactLayout;
pub use vectorizer::DictVectorizer;
pub use calibrated::{Calibration, CalibratedLinearModel, LinearMember};
pub use store::{CachedArtifactStore, FileArtifactStore};

use std::sync::Arc;

use crate::errors::Result;
use crate::types::{DiseaseTarget, FeatureVector, PatientObservation};

/// Maps an observation into model feature space
pub trait FeatureTransformer: Send + Sync {
    fn transform(&self, observation: &PatientObservation) -> Result<FeatureVector>;
}

/// Produces the positive-class probability for a feature vector
pub trait ProbabilityModel: Send + Sync {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64>;
}

/// Vectorizer and classifier loaded for one target
#[derive(Clone)]
pub struct ArtifactPair {
    pub vectorizer: Arc<dyn FeatureTransformer>,
    pub classifier: Arc<dyn ProbabilityModel>,
}

impl ArtifactPair {
    pub fn new(
        vectorizer: impl FeatureTransformer + 'static,
        classifier: impl ProbabilityModel + 'static,
    ) -> Self {
        Self {
            vectorizer: Arc::new(vectorizer),
            classifier: Arc::new(classifier),
        }
    }
}

impl std::fmt::Debug for ArtifactPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactPair").finish_non_exhaustive()
    }
}

/// Resolves the artifact pair for a target
pub trait ArtifactSource: Send + Sync {
    fn load(&self, target: DiseaseTarget) -> Result<ArtifactPair>;
}

impl<S: ArtifactSource + ?Sized> ArtifactSource for Arc<S> {
    fn load(&self, target: DiseaseTarget) -> Result<ArtifactPair> {
        (**self).load(target)
    }
}
