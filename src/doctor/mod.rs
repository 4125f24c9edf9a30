//! Doctor command for artifact diagnostics
//!
//! Checks that every screening target has a readable artifact pair that
//! accepts a default observation.

use colored::Colorize;

use crate::artifacts::{ArtifactSource, FileArtifactStore};
use crate::form::ScreeningForm;
use crate::types::DiseaseTarget;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

/// Doctor diagnostics system
pub struct Doctor {
    store: FileArtifactStore,
}

impl Doctor {
    /// Create a new doctor instance
    pub fn new(store: FileArtifactStore) -> Self {
        Self { store }
    }

    /// Run all health checks
    pub fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = vec![self.check_artifacts_dir()];
        for target in DiseaseTarget::ALL {
            checks.push(self.check_target(target));
        }
        checks
    }

    /// Check 1: artifacts directory exists
    fn check_artifacts_dir(&self) -> HealthCheck {
        let dir = self.store.layout().dir();
        let status = if dir.is_dir() {
            HealthStatus::Pass
        } else {
            HealthStatus::Fail(format!("{} is not a directory", dir.display()))
        };
        HealthCheck {
            name: "Artifacts directory".to_string(),
            status,
        }
    }

    /// Check per target: pair loads and scores the form defaults
    fn check_target(&self, target: DiseaseTarget) -> HealthCheck {
        let name = format!("{} artifacts", target.label());

        let pair = match self.store.load(target) {
            Ok(pair) => pair,
            Err(e) => {
                return HealthCheck {
                    name,
                    status: HealthStatus::Fail(e.to_string()),
                }
            }
        };

        let status = match ScreeningForm::default().observation() {
            Ok(observation) => match pair
                .vectorizer
                .transform(&observation)
                .and_then(|features| pair.classifier.predict_probability(&features))
            {
                Ok(_) => HealthStatus::Pass,
                Err(e) => HealthStatus::Warn(format!("Loads but cannot score: {}", e)),
            },
            Err(e) => HealthStatus::Warn(e.to_string()),
        };
        HealthCheck { name, status }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}", "MediTrack Doctor".bold());
        println!("─────────────────────────────────────");

        for check in checks {
            match &check.status {
                HealthStatus::Pass => println!("{} {}", "✓".green(), check.name),
                HealthStatus::Warn(msg) => {
                    println!("{} {}: {}", "!".yellow(), check.name, msg.yellow())
                }
                HealthStatus::Fail(msg) => println!("{} {}: {}", "✗".red(), check.name, msg.red()),
            }
        }

        let failed = checks
            .iter()
            .filter(|c| matches!(c.status, HealthStatus::Fail(_)))
            .count();
        println!();
        if failed == 0 {
            println!("{}", "All screening targets are ready.".green());
        } else {
            println!("{}", format!("{} check(s) failed.", failed).red());
        }
        println!();
    }

    /// Check if all checks passed
    pub fn all_passed(checks: &[HealthCheck]) -> bool {
        checks.iter().all(|c| c.status == HealthStatus::Pass)
    }

    /// Check if any critical failures
    pub fn has_failures(checks: &[HealthCheck]) -> bool {
        checks
            .iter()
            .any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ArtifactLayout;
    use tempfile::TempDir;

    fn write_pair(dir: &std::path::Path, target: &str, features: &str, coefficients: &str) {
        std::fs::write(
            dir.join(format!("{}_vectorizer.json", target)),
            format!(r#"{{"feature_names": {}}}"#, features),
        )
        .unwrap();
        std::fs::write(
            dir.join(format!("{}_calibrated_model.json", target)),
            format!(r#"{{"members": [{{"coefficients": {}, "intercept": 0.0}}]}}"#, coefficients),
        )
        .unwrap();
    }

    #[test]
    fn test_missing_directory_fails() {
        let doctor = Doctor::new(FileArtifactStore::new(ArtifactLayout::new(
            "/nonexistent/meditrack/artifacts",
        )));
        let checks = doctor.run_diagnostics();
        assert_eq!(checks.len(), 5);
        assert!(Doctor::has_failures(&checks));
        assert!(checks.iter().all(|c| matches!(c.status, HealthStatus::Fail(_))));
    }

    #[test]
    fn test_complete_artifacts_pass() {
        let dir = TempDir::new().unwrap();
        for target in DiseaseTarget::ALL {
            write_pair(dir.path(), target.short_name(), r#"["Age", "BMI"]"#, "[0.01, 0.02]");
        }
        let doctor = Doctor::new(FileArtifactStore::new(ArtifactLayout::new(dir.path())));
        let checks = doctor.run_diagnostics();
        assert!(Doctor::all_passed(&checks));
    }

    #[test]
    fn test_shape_mismatch_warns() {
        let dir = TempDir::new().unwrap();
        for target in DiseaseTarget::ALL {
            write_pair(dir.path(), target.short_name(), r#"["Age", "BMI"]"#, "[0.01, 0.02]");
        }
        write_pair(dir.path(), "heart", r#"["Age"]"#, "[0.01, 0.02]");

        let doctor = Doctor::new(FileArtifactStore::new(ArtifactLayout::new(dir.path())));
        let checks = doctor.run_diagnostics();
        assert!(!Doctor::has_failures(&checks));
        let heart = checks.iter().find(|c| c.name.starts_with("Heart")).unwrap();
        assert!(matches!(heart.status, HealthStatus::Warn(_)));
    }
}
