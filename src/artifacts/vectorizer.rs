//! Dictionary vectorizer artifact
//!
//! Picks observation values by key in the order the training pipeline
//! fixed, optionally standardizing each column.

use serde::{Deserialize, Serialize};

use super::FeatureTransformer;
use crate::errors::{Result, ScreeningError};
use crate::types::{FeatureVector, PatientObservation};

/// Per-column standardization learned at training time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Serialized feature transformer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictVectorizer {
    /// Observation keys in model column order
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
}

impl DictVectorizer {
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            feature_names,
            scaler: None,
        }
    }

    pub fn with_scaler(mut self, mean: Vec<f64>, scale: Vec<f64>) -> Self {
        self.scaler = Some(StandardScaler { mean, scale });
        self
    }

    /// Parse a vectorizer document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn check_scaler(&self, scaler: &StandardScaler) -> Result<()> {
        let columns = self.feature_names.len();
        if scaler.mean.len() != columns || scaler.scale.len() != columns {
            return Err(ScreeningError::TransformError(format!(
                "scaler has {} means and {} scales for {} features",
                scaler.mean.len(),
                scaler.scale.len(),
                columns
            )));
        }
        Ok(())
    }
}

impl FeatureTransformer for DictVectorizer {
    fn transform(&self, observation: &PatientObservation) -> Result<FeatureVector> {
        if self.feature_names.is_empty() {
            return Err(ScreeningError::TransformError(
                "vectorizer has no features".to_string(),
            ));
        }
        if let Some(scaler) = &self.scaler {
            self.check_scaler(scaler)?;
        }

        let mut vector = FeatureVector::with_capacity(self.feature_names.len());
        for (column, name) in self.feature_names.iter().enumerate() {
            let raw = observation.feature(name).ok_or_else(|| {
                ScreeningError::TransformError(format!("unknown feature '{}'", name))
            })?;
            let value = match &self.scaler {
                Some(scaler) => {
                    // Constant columns are stored with a zero scale
                    let scale = if scaler.scale[column] == 0.0 {
                        1.0
                    } else {
                        scaler.scale[column]
                    };
                    (raw - scaler.mean[column]) / scale
                }
                None => raw,
            };
            vector.push(name.clone(), value);
        }
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn names(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_transform_follows_artifact_order() {
        let vectorizer = DictVectorizer::new(names(&["Temp", "Age", "Glucose"]));
        let vector = vectorizer.transform(&observation()).unwrap();
        assert_eq!(vector.values(), &[98.6, 30.0, 90.0]);
        assert_eq!(vector.names()[0], "Temp");
    }

    #[test]
    fn test_transform_standardizes() {
        let vectorizer = DictVectorizer::new(names(&["Age", "BMI"]))
            .with_scaler(vec![20.0, 22.0], vec![5.0, 0.0]);
        let vector = vectorizer.transform(&observation()).unwrap();
        assert_eq!(vector.values(), &[2.0, 0.0]);
    }

    #[test]
    fn test_unknown_feature_is_transform_error() {
        let vectorizer = DictVectorizer::new(names(&["Age", "Cholesterol"]));
        let err = vectorizer.transform(&observation()).unwrap_err();
        assert!(matches!(err, ScreeningError::TransformError(_)));
        assert!(err.to_string().contains("Cholesterol"));
    }

    #[test]
    fn test_scaler_length_mismatch() {
        let vectorizer =
            DictVectorizer::new(names(&["Age", "BMI"])).with_scaler(vec![1.0], vec![1.0]);
        assert!(matches!(
            vectorizer.transform(&observation()),
            Err(ScreeningError::TransformError(_))
        ));
    }

    #[test]
    fn test_from_json_without_scaler() {
        let vectorizer =
            DictVectorizer::from_json(r#"{"feature_names": ["Age", "BMI"]}"#).unwrap();
        assert_eq!(vectorizer.feature_names, names(&["Age", "BMI"]));
        assert!(vectorizer.scaler.is_none());
    }
}
