//! Command-line argument parsing for MediTrack
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Args as ClapArgs, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use crate::form::{ScreeningForm, FORM_DEFAULTS};

/// MediTrack - AI patient risk screening in the terminal
#[derive(Parser, Debug)]
#[command(name = "meditrack")]
#[command(version)]
#[command(about = "Clinical risk screening from patient vitals. For guidance only.", long_about = None)]
pub struct Args {
    /// Directory holding the screening artifacts
    #[arg(long, global = true, env = "MEDITRACK_ARTIFACTS_DIR")]
    pub artifacts_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except the result)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Reload artifacts on every screening
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fill in the screening form interactively
    Form,

    /// Screen one patient from command-line values
    Screen(ScreenArgs),

    /// List screening targets and their artifact files
    Targets,

    /// Check that every target's artifacts are present and readable
    Doctor,

    /// Display current configuration
    Config,
}

/// Patient values for a single screening
#[derive(ClapArgs, Debug, Clone)]
pub struct ScreenArgs {
    /// Screening target: diabetes, breast, heart or kidney
    #[arg(short, long)]
    pub target: String,

    /// Patient full name (shown only)
    #[arg(long, default_value = "")]
    pub name: String,

    /// Age in years (1-120)
    #[arg(long, default_value_t = FORM_DEFAULTS.age)]
    pub age: u32,

    /// Body mass index (10.0-50.0)
    #[arg(long, default_value_t = FORM_DEFAULTS.bmi)]
    pub bmi: f64,

    /// Glucose level in mg/dL (40.0-350.0)
    #[arg(long, default_value_t = FORM_DEFAULTS.glucose)]
    pub glucose: f64,

    /// Blood pressure in mmHg (40.0-220.0)
    #[arg(long = "bp", default_value_t = FORM_DEFAULTS.blood_pressure)]
    pub blood_pressure: f64,

    /// Heart rate in bpm (30-240)
    #[arg(long = "hr", default_value_t = FORM_DEFAULTS.heart_rate)]
    pub heart_rate: u32,

    /// Body temperature in °F (94.0-105.0)
    #[arg(long = "temp", default_value_t = FORM_DEFAULTS.temperature)]
    pub temperature: f64,

    /// I certify the input is correct
    #[arg(long)]
    pub certify: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl ScreenArgs {
    /// Form as it would have been filled in
    pub fn to_form(&self) -> ScreeningForm {
        ScreeningForm {
            name: self.name.clone(),
            age: self.age,
            target: self.target.clone(),
            bmi: self.bmi,
            glucose: self.glucose,
            blood_pressure: self.blood_pressure,
            heart_rate: self.heart_rate,
            temperature: self.temperature,
            certified: self.certify,
        }
    }
}

impl Verbosity {
    /// Parse the config file spelling
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Check if should show spinners and summaries
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show detailed events
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }

    /// Log filter for env_logger
    pub fn log_level(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Error,
            Verbosity::Normal => LevelFilter::Warn,
            Verbosity::Verbose => LevelFilter::Info,
            Verbosity::VeryVerbose => LevelFilter::Debug,
        }
    }
}
