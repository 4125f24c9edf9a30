//! Risk tiers and assessments
//!
//! The tier is a pure function of the probability. Thresholds are fixed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Probabilities at or above this are High risk
pub const HIGH_RISK_THRESHOLD: f64 = 0.70;

/// Probabilities at or above this (and below High) are Moderate risk
pub const MODERATE_RISK_THRESHOLD: f64 = 0.40;

/// Bucketed interpretation of a calibrated probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Classify a probability against the fixed thresholds
    pub fn from_probability(probability: f64) -> Self {
        if probability >= HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if probability >= MODERATE_RISK_THRESHOLD {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    /// Heading shown on the result card
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::High => "High Risk",
            RiskTier::Moderate => "Moderate Risk",
            RiskTier::Low => "Low Risk",
        }
    }

    /// Guidance shown under the probability
    pub fn message(&self) -> &'static str {
        match self {
            RiskTier::High => "Immediate clinical evaluation needed.",
            RiskTier::Moderate => "Please consult your doctor soon.",
            RiskTier::Low => "Maintain healthy lifestyle!",
        }
    }

    /// Card color as a hex string
    pub fn color_hex(&self) -> &'static str {
        match self {
            RiskTier::High => "#e32636",
            RiskTier::Moderate => "#b88a00",
            RiskTier::Low => "#13764a",
        }
    }

    /// Card color as RGB
    pub fn color_rgb(&self) -> (u8, u8, u8) {
        match self {
            RiskTier::High => (227, 38, 54),
            RiskTier::Moderate => (184, 138, 0),
            RiskTier::Low => (19, 118, 74),
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            RiskTier::High => "🛑",
            RiskTier::Moderate => "⚠️",
            RiskTier::Low => "🟢",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Calibrated probability of the positive (at-risk) class, in [0, 1]
    pub probability: f64,
    pub tier: RiskTier,
}

impl RiskAssessment {
    /// Build an assessment, deriving the tier from the probability
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            tier: RiskTier::from_probability(probability),
        }
    }

    /// Percentage rounded to one decimal place, ties to even
    pub fn percent(&self) -> f64 {
        (self.probability * 100.0 * 10.0).round_ties_even() / 10.0
    }

    /// Truncated integer percentage for progress bars
    pub fn percent_floor(&self) -> u64 {
        (self.probability * 100.0) as u64
    }
}
