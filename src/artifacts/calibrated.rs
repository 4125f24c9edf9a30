//! Calibrated linear classifier artifact
//!
//! One or more linear members (one per calibration fold). Each member maps
//! its decision value to a probability through its own calibrator and the
//! model reports the mean over members.

use candle_core::{Device, Tensor};
use serde::{Deserialize, Serialize};

use super::ProbabilityModel;
use crate::errors::{Result, ScreeningError};
use crate::types::FeatureVector;

/// Maps a decision value to a probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum Calibration {
    /// Platt scaling: `1 / (1 + exp(a * f + b))`
    Sigmoid { a: f64, b: f64 },
    /// Piecewise-linear over increasing breakpoints, clipped at both ends
    Isotonic { x: Vec<f64>, y: Vec<f64> },
    /// Plain logistic of the decision value
    #[default]
    None,
}

impl Calibration {
    pub fn apply(&self, decision: f64) -> Result<f64> {
        match self {
            Calibration::Sigmoid { a, b } => Ok(1.0 / (1.0 + (a * decision + b).exp())),
            Calibration::Isotonic { x, y } => interpolate(x, y, decision),
            Calibration::None => Ok(1.0 / (1.0 + (-decision).exp())),
        }
    }
}

fn interpolate(x: &[f64], y: &[f64], at: f64) -> Result<f64> {
    if !at.is_finite() {
        return Err(ScreeningError::InferenceError(format!(
            "decision value {} cannot be calibrated",
            at
        )));
    }
    if x.is_empty() || x.len() != y.len() {
        return Err(ScreeningError::InferenceError(format!(
            "isotonic calibration has {} breakpoints and {} values",
            x.len(),
            y.len()
        )));
    }
    let last = x.len() - 1;
    if at <= x[0] {
        return Ok(y[0]);
    }
    if at >= x[last] {
        return Ok(y[last]);
    }
    // x[i] <= at < x[i + 1] for the first breakpoint above `at`
    let upper = x.partition_point(|bp| *bp <= at);
    let (x0, x1, y0, y1) = (x[upper - 1], x[upper], y[upper - 1], y[upper]);
    if x1 == x0 {
        return Ok(y0);
    }
    Ok(y0 + (at - x0) * (y1 - y0) / (x1 - x0))
}

/// One calibrated linear decision function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearMember {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub calibration: Calibration,
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

/// Serialized calibrated classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedLinearModel {
    /// Class labels; the last one is the positive (at-risk) class
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
    pub members: Vec<LinearMember>,
}

impl CalibratedLinearModel {
    pub fn new(members: Vec<LinearMember>) -> Self {
        Self {
            classes: default_classes(),
            members,
        }
    }

    /// Parse a model document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Decision value of every member for one feature row
    fn decisions(&self, features: &[f64]) -> Result<Vec<f64>> {
        let n = features.len();
        let m = self.members.len();

        let mut weights = Vec::with_capacity(n * m);
        let mut intercepts = Vec::with_capacity(m);
        for (index, member) in self.members.iter().enumerate() {
            if member.coefficients.len() != n {
                return Err(ScreeningError::InferenceError(format!(
                    "member {} expects {} features, got {}",
                    index,
                    member.coefficients.len(),
                    n
                )));
            }
            weights.extend_from_slice(&member.coefficients);
            intercepts.push(member.intercept);
        }

        let device = Device::Cpu;
        let row = Tensor::from_vec(features.to_vec(), (1, n), &device)?;
        let weights = Tensor::from_vec(weights, (m, n), &device)?.t()?.contiguous()?;
        let intercepts = Tensor::from_vec(intercepts, (1, m), &device)?;

        let decisions = row.matmul(&weights)?.broadcast_add(&intercepts)?;
        let mut rows = decisions.to_vec2::<f64>()?;
        rows.pop()
            .ok_or_else(|| ScreeningError::InferenceError("empty decision output".to_string()))
    }
}

impl ProbabilityModel for CalibratedLinearModel {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64> {
        if self.classes.len() != 2 {
            return Err(ScreeningError::InferenceError(format!(
                "expected a binary classifier, found {} classes",
                self.classes.len()
            )));
        }
        if self.members.is_empty() {
            return Err(ScreeningError::InferenceError(
                "model has no calibrated members".to_string(),
            ));
        }
        if features.is_empty() {
            return Err(ScreeningError::InferenceError("empty feature vector".to_string()));
        }

        let decisions = self.decisions(features.values())?;
        let mut total = 0.0;
        for (member, decision) in self.members.iter().zip(decisions) {
            total += member.calibration.apply(decision)?;
        }
        let probability = total / self.members.len() as f64;

        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(ScreeningError::InferenceError(format!(
                "probability {} outside [0, 1]",
                probability
            )));
        }
        Ok(probability)
    }
}
