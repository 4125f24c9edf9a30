//! Terminal rendering for the screening form
//!
//! Vitals summary, the colored result card, and status lines.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::form::FormOutcome;
use crate::report::ScreeningReport;
use crate::types::{PatientObservation, RiskTier};

const BAR_WIDTH: usize = 40;

/// "HR 72 bpm | BP 120.0 mmHg | GLU 90.0 mg/dL | TEMP 98.6 °F"
///
/// Float vitals always keep their decimal point.
pub fn render_vitals(observation: &PatientObservation) -> String {
    format!(
        "HR {} bpm | BP {:?} mmHg | GLU {:?} mg/dL | TEMP {:?} °F",
        observation.heart_rate,
        observation.blood_pressure,
        observation.glucose,
        observation.temperature
    )
}

/// Fixed-width text bar for a 0-100 percentage
pub fn render_bar(percent: u64, width: usize) -> String {
    let filled = ((percent.min(100) as usize) * width) / 100;
    format!("[{}{}] {}%", "#".repeat(filled), "-".repeat(width - filled), percent.min(100))
}

/// Uncolored lines of the result card
pub fn render_card(report: &ScreeningReport) -> Vec<String> {
    let tier = report.assessment.tier;
    vec![
        format!("{} {}", tier.marker(), tier.label()),
        report.probability_line(),
        tier.message().to_string(),
        render_bar(report.assessment.percent_floor(), BAR_WIDTH),
    ]
}

fn tint(text: &str, tier: RiskTier) -> ColoredString {
    let (r, g, b) = tier.color_rgb();
    text.truecolor(r, g, b)
}

/// Terminal output for form sessions
pub struct DisplayManager {
    show_vitals: bool,
    show_progress: bool,
    update_interval: Duration,
}

impl DisplayManager {
    pub fn new(show_vitals: bool, show_progress: bool) -> Self {
        DisplayManager {
            show_vitals,
            show_progress,
            update_interval: Duration::from_millis(100),
        }
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str) {
        if !self.show_progress {
            return;
        }
        let width = 64;
        println!("\n{}", "=".repeat(width).blue());
        println!("{}", format!("  MediTrack Health {} - AI Patient Risk", version).bold().blue());
        println!("{}", "  Clinical risk assessment. For guidance only.".yellow());
        println!("{}\n", "=".repeat(width).blue());
    }

    /// Spinner while the evaluation runs
    pub fn start_analysis(&self) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Analyzing profile...");
        pb.enable_steady_tick(self.update_interval);
        Some(pb)
    }

    pub fn show_vitals(&self, observation: &PatientObservation) {
        if self.show_vitals {
            println!("{}", render_vitals(observation).bold().blue());
        }
    }

    /// Print the colored result card
    pub fn show_report(&self, report: &ScreeningReport) {
        let tier = report.assessment.tier;
        let lines = render_card(report);
        println!();
        println!("{}", tint(&lines[0], tier).bold());
        println!("{}", tint(&lines[1], tier).bold());
        println!("{}", tint(&lines[2], tier));
        println!("{}", tint(&lines[3], tier));
        println!();
    }

    /// Print whatever the submission produced
    pub fn show_outcome(&self, outcome: &FormOutcome) {
        match outcome {
            FormOutcome::NotCertified => self.show_warning(&outcome.message()),
            FormOutcome::Rejected(_) | FormOutcome::Failed { .. } => {
                self.show_error(&outcome.message())
            }
            FormOutcome::Completed(report) => {
                self.show_report(report);
                self.show_success(&outcome.message());
            }
        }
    }

    pub fn show_success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    pub fn show_info(&self, info: &str) {
        if self.show_progress {
            println!("{}", info.dimmed());
        }
    }
}
