//! Disease targets
//!
//! Each target owns a canonical short name used as the artifact key and a
//! display label used by the form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ScreeningError;

/// Screening category selecting which artifact pair is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiseaseTarget {
    Diabetes,
    Breast,
    Heart,
    Kidney,
}

/// (target, canonical short name, display label)
static TARGET_TABLE: [(DiseaseTarget, &str, &str); 4] = [
    (DiseaseTarget::Diabetes, "diabetes", "Diabetes"),
    (DiseaseTarget::Breast, "breast", "Breast Cancer"),
    (DiseaseTarget::Heart, "heart", "Heart Disease"),
    (DiseaseTarget::Kidney, "kidney", "Kidney Disease"),
];

impl DiseaseTarget {
    /// All targets in form order
    pub const ALL: [DiseaseTarget; 4] = [
        DiseaseTarget::Diabetes,
        DiseaseTarget::Breast,
        DiseaseTarget::Heart,
        DiseaseTarget::Kidney,
    ];

    fn entry(&self) -> &'static (DiseaseTarget, &'static str, &'static str) {
        // Every variant has exactly one row
        &TARGET_TABLE[*self as usize]
    }

    /// Canonical short name, the artifact file prefix
    pub fn short_name(&self) -> &'static str {
        self.entry().1
    }

    /// Label shown in the form ("Breast Cancer", ...)
    pub fn label(&self) -> &'static str {
        self.entry().2
    }
}

impl fmt::Display for DiseaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for DiseaseTarget {
    type Err = ScreeningError;

    /// Accepts the short name or the display label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TARGET_TABLE
            .iter()
            .find(|(_, short, label)| {
                short.eq_ignore_ascii_case(wanted) || label.eq_ignore_ascii_case(wanted)
            })
            .map(|(target, _, _)| *target)
            .ok_or_else(|| {
                ScreeningError::InvalidInput(format!(
                    "Unknown screening target '{}' (expected one of: diabetes, breast, heart, kidney)",
                    wanted
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows_match_variants() {
        for target in DiseaseTarget::ALL {
            assert_eq!(target.entry().0, target);
        }
    }

    #[test]
    fn test_short_names() {
        let names: Vec<&str> = DiseaseTarget::ALL.iter().map(|t| t.short_name()).collect();
        assert_eq!(names, vec!["diabetes", "breast", "heart", "kidney"]);
    }

    #[test]
    fn test_parse_short_name_and_label() {
        assert_eq!("heart".parse::<DiseaseTarget>().unwrap(), DiseaseTarget::Heart);
        assert_eq!("Breast Cancer".parse::<DiseaseTarget>().unwrap(), DiseaseTarget::Breast);
        assert_eq!(" KIDNEY ".parse::<DiseaseTarget>().unwrap(), DiseaseTarget::Kidney);
    }

    #[test]
    fn test_parse_unknown_target() {
        let err = "liver".parse::<DiseaseTarget>().unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidInput(_)));
        assert!(err.to_string().contains("liver"));
    }

    #[test]
    fn test_display_uses_short_name() {
        assert_eq!(DiseaseTarget::Breast.to_string(), "breast");
        assert_eq!(DiseaseTarget::Breast.label(), "Breast Cancer");
    }
}
