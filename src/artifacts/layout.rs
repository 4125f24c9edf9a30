//! Artifact naming convention
//!
//! `{dir}/{target}_vectorizer.{ext}` and `{dir}/{target}_calibrated_model.{ext}`

use std::path::{Path, PathBuf};

use crate::types::DiseaseTarget;

pub const VECTORIZER_SUFFIX: &str = "_vectorizer";
pub const MODEL_SUFFIX: &str = "_calibrated_model";
pub const DEFAULT_EXTENSION: &str = "json";

/// Where a target's artifact files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    dir: PathBuf,
    extension: String,
}

impl ArtifactLayout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Override the file extension (without the leading dot)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file(&self, target: DiseaseTarget, suffix: &str) -> PathBuf {
        let mut name = format!("{}{}", target.short_name(), suffix);
        if !self.extension.is_empty() {
            name.push('.');
            name.push_str(&self.extension);
        }
        self.dir.join(name)
    }

    pub fn vectorizer_path(&self, target: DiseaseTarget) -> PathBuf {
        self.file(target, VECTORIZER_SUFFIX)
    }

    pub fn model_path(&self, target: DiseaseTarget) -> PathBuf {
        self.file(target, MODEL_SUFFIX)
    }

    /// First missing file of the pair, if any
    pub fn missing_file(&self, target: DiseaseTarget) -> Option<PathBuf> {
        [self.vectorizer_path(target), self.model_path(target)]
            .into_iter()
            .find(|path| !path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_naming_convention() {
        let layout = ArtifactLayout::new("artifacts");
        assert_eq!(
            layout.vectorizer_path(DiseaseTarget::Diabetes),
            PathBuf::from("artifacts/diabetes_vectorizer.json")
        );
        assert_eq!(
            layout.model_path(DiseaseTarget::Kidney),
            PathBuf::from("artifacts/kidney_calibrated_model.json")
        );
    }

    #[test]
    fn test_custom_extension() {
        let layout = ArtifactLayout::new("/models").with_extension(".art");
        assert_eq!(
            layout.model_path(DiseaseTarget::Heart),
            PathBuf::from("/models/heart_calibrated_model.art")
        );
    }

    #[test]
    fn test_empty_extension() {
        let layout = ArtifactLayout::new("a").with_extension("");
        assert_eq!(
            layout.vectorizer_path(DiseaseTarget::Breast),
            PathBuf::from("a/breast_vectorizer")
        );
    }

    #[test]
    fn test_missing_file_in_empty_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let layout = ArtifactLayout::new(dir.path());
        assert_eq!(
            layout.missing_file(DiseaseTarget::Heart),
            Some(layout.vectorizer_path(DiseaseTarget::Heart))
        );
    }
}
