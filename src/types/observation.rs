//! Patient observation and model feature vectors

use serde::{Deserialize, Serialize};

/// Observation keys as the vectorizer artifacts name them
pub const FEATURE_KEYS: [&str; 6] = ["Age", "BMI", "Glucose", "BP", "HR", "Temp"];

/// Vitals collected for one screening.
///
/// Built fresh per submission and only ever borrowed by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientObservation {
    /// Age in years
    pub age: u32,
    /// Body mass index (kg/m²)
    pub bmi: f64,
    /// Blood glucose (mg/dL)
    pub glucose: f64,
    /// Blood pressure (mmHg)
    pub blood_pressure: f64,
    /// Heart rate (bpm)
    pub heart_rate: u32,
    /// Body temperature (°F)
    pub temperature: f64,
}

impl PatientObservation {
    /// Look up a vital by its feature key
    pub fn feature(&self, key: &str) -> Option<f64> {
        match key {
            "Age" => Some(f64::from(self.age)),
            "BMI" => Some(self.bmi),
            "Glucose" => Some(self.glucose),
            "BP" => Some(self.blood_pressure),
            "HR" => Some(f64::from(self.heart_rate)),
            "Temp" => Some(self.temperature),
            _ => None,
        }
    }

    /// All vitals as (key, value) pairs in `FEATURE_KEYS` order
    pub fn features(&self) -> Vec<(&'static str, f64)> {
        FEATURE_KEYS
            .iter()
            .filter_map(|key| self.feature(key).map(|value| (*key, value)))
            .collect()
    }
}

/// Observation mapped into a model's feature space
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Create an empty vector with room for `capacity` features
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append a named feature
    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.names.push(name.into());
        self.values.push(value);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        let names = (0..values.len()).map(|i| format!("x{}", i)).collect();
        Self { names, values }
    }
}
