//! Artifact stores
//!
//! `FileArtifactStore` reads the pair from disk on every call.
//! `CachedArtifactStore` keeps loaded pairs per target for the life of the
//! process; artifacts never change once produced, so entries are never
//! invalidated.

use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use super::{ArtifactLayout, ArtifactPair, ArtifactSource, CalibratedLinearModel, DictVectorizer};
use crate::errors::{Result, ScreeningError};
use crate::types::DiseaseTarget;

/// Reads JSON artifacts from an artifacts directory
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    layout: ArtifactLayout,
}

impl FileArtifactStore {
    pub fn new(layout: ArtifactLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    fn read(&self, target: DiseaseTarget, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScreeningError::ArtifactNotFound {
                target,
                path: path.to_path_buf(),
            },
            _ => ScreeningError::ArtifactCorrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })
    }

    /// Load and parse the vectorizer for a target
    pub fn load_vectorizer(&self, target: DiseaseTarget) -> Result<DictVectorizer> {
        let path = self.layout.vectorizer_path(target);
        let contents = self.read(target, &path)?;
        DictVectorizer::from_json(&contents).map_err(|e| ScreeningError::ArtifactCorrupt {
            path,
            reason: e.to_string(),
        })
    }

    /// Load and parse the calibrated model for a target
    pub fn load_model(&self, target: DiseaseTarget) -> Result<CalibratedLinearModel> {
        let path = self.layout.model_path(target);
        let contents = self.read(target, &path)?;
        CalibratedLinearModel::from_json(&contents).map_err(|e| {
            ScreeningError::ArtifactCorrupt {
                path,
                reason: e.to_string(),
            }
        })
    }
}

impl ArtifactSource for FileArtifactStore {
    fn load(&self, target: DiseaseTarget) -> Result<ArtifactPair> {
        // Report a missing pair before reading either half
        if let Some(path) = self.layout.missing_file(target) {
            return Err(ScreeningError::ArtifactNotFound { target, path });
        }

        let vectorizer = self.load_vectorizer(target)?;
        let model = self.load_model(target)?;
        debug!(
            "loaded {} artifacts: {} features, {} calibrated members",
            target,
            vectorizer.feature_names.len(),
            model.members.len()
        );
        Ok(ArtifactPair::new(vectorizer, model))
    }
}

/// Process-wide read-only cache in front of another source
pub struct CachedArtifactStore<S> {
    inner: S,
    pairs: RwLock<HashMap<DiseaseTarget, ArtifactPair>>,
}

impl<S: ArtifactSource> CachedArtifactStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            pairs: RwLock::new(HashMap::new()),
        }
    }

    /// Targets currently held in the cache
    pub fn cached_targets(&self) -> Vec<DiseaseTarget> {
        let pairs = self.pairs.read().unwrap_or_else(|e| e.into_inner());
        let mut targets: Vec<DiseaseTarget> = pairs.keys().copied().collect();
        targets.sort_by_key(|t| *t as usize);
        targets
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: ArtifactSource> ArtifactSource for CachedArtifactStore<S> {
    fn load(&self, target: DiseaseTarget) -> Result<ArtifactPair> {
        {
            let pairs = self.pairs.read().unwrap_or_else(|e| e.into_inner());
            if let Some(pair) = pairs.get(&target) {
                debug!("artifact cache hit for {}", target);
                return Ok(pair.clone());
            }
        }

        // Failures are returned without touching the cache
        let pair = self.inner.load(target)?;
        let mut pairs = self.pairs.write().unwrap_or_else(|e| e.into_inner());
        let pair = pairs.entry(target).or_insert(pair).clone();
        info!("cached artifacts for {}", target);
        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{FeatureTransformer, ProbabilityModel};
    use crate::types::{FeatureVector, PatientObservation};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct Passthrough;

    impl FeatureTransformer for Passthrough {
        fn transform(&self, observation: &PatientObservation) -> Result<FeatureVector> {
            Ok(vec![f64::from(observation.age)].into())
        }
    }

    struct Fixed(f64);

    impl ProbabilityModel for Fixed {
        fn predict_probability(&self, _features: &FeatureVector) -> Result<f64> {
            Ok(self.0)
        }
    }

    /// Counts loads and fails for kidney
    struct CountingSource {
        loads: AtomicUsize,
    }

    impl ArtifactSource for CountingSource {
        fn load(&self, target: DiseaseTarget) -> Result<ArtifactPair> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if target == DiseaseTarget::Kidney {
                return Err(ScreeningError::ArtifactNotFound {
                    target,
                    path: "kidney_vectorizer.json".into(),
                });
            }
            Ok(ArtifactPair::new(Passthrough, Fixed(0.5)))
        }
    }

    fn write_pair(dir: &Path, target: &str) {
        std::fs::write(
            dir.join(format!("{}_vectorizer.json", target)),
            r#"{"feature_names": ["Age", "BMI"]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.join(format!("{}_calibrated_model.json", target)),
            r#"{"members": [{"coefficients": [0.0, 0.0], "intercept": 0.0}]}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_file_store_loads_pair() {
        let dir = TempDir::new().unwrap();
        write_pair(dir.path(), "heart");
        let store = FileArtifactStore::new(ArtifactLayout::new(dir.path()));
        let pair = store.load(DiseaseTarget::Heart).unwrap();

        let observation = PatientObservation {
            age: 30,
            bmi: 22.0,
            glucose: 90.0,
            blood_pressure: 120.0,
            heart_rate: 72,
            temperature: 98.6,
        };
        let features = pair.vectorizer.transform(&observation).unwrap();
        let p = pair.classifier.predict_probability(&features).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_file_store_missing_pair() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(ArtifactLayout::new(dir.path()));
        match store.load(DiseaseTarget::Kidney) {
            Err(ScreeningError::ArtifactNotFound { target, path }) => {
                assert_eq!(target, DiseaseTarget::Kidney);
                assert!(path.ends_with("kidney_vectorizer.json"));
            }
            other => panic!("expected ArtifactNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_file_store_missing_model_only() {
        let dir = TempDir::new().unwrap();
        write_pair(dir.path(), "breast");
        std::fs::remove_file(dir.path().join("breast_calibrated_model.json")).unwrap();
        let store = FileArtifactStore::new(ArtifactLayout::new(dir.path()));
        match store.load(DiseaseTarget::Breast) {
            Err(ScreeningError::ArtifactNotFound { path, .. }) => {
                assert!(path.ends_with("breast_calibrated_model.json"));
            }
            other => panic!("expected ArtifactNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_file_store_corrupt_artifact() {
        let dir = TempDir::new().unwrap();
        write_pair(dir.path(), "diabetes");
        std::fs::write(dir.path().join("diabetes_vectorizer.json"), "not json").unwrap();
        let store = FileArtifactStore::new(ArtifactLayout::new(dir.path()));
        assert!(matches!(
            store.load(DiseaseTarget::Diabetes),
            Err(ScreeningError::ArtifactCorrupt { .. })
        ));
    }

    #[test]
    fn test_cache_loads_each_target_once() {
        let cache = CachedArtifactStore::new(CountingSource {
            loads: AtomicUsize::new(0),
        });
        for _ in 0..3 {
            cache.load(DiseaseTarget::Heart).unwrap();
        }
        cache.load(DiseaseTarget::Diabetes).unwrap();
        assert_eq!(cache.inner().loads.load(Ordering::SeqCst), 2);
        assert_eq!(
            cache.cached_targets(),
            vec![DiseaseTarget::Diabetes, DiseaseTarget::Heart]
        );
    }

    #[test]
    fn test_cache_does_not_keep_failures() {
        let cache = CachedArtifactStore::new(CountingSource {
            loads: AtomicUsize::new(0),
        });
        assert!(cache.load(DiseaseTarget::Kidney).is_err());
        assert!(cache.load(DiseaseTarget::Kidney).is_err());
        assert_eq!(cache.inner().loads.load(Ordering::SeqCst), 2);
        assert!(cache.cached_targets().is_empty());
    }
}
