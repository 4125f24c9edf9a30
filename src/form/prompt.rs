//! Interactive form entry using rustyline
//!
//! Each field shows its default and range; an empty answer keeps the
//! default and an invalid one asks again.

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use super::{
    FieldRange, ScreeningForm, AGE_RANGE, BMI_RANGE, BP_RANGE, FORM_DEFAULTS, GLUCOSE_RANGE,
    HR_RANGE, TEMP_RANGE,
};
use crate::types::DiseaseTarget;

/// Parse a numeric answer, falling back to `default` on empty input
pub fn parse_field<T>(input: &str, default: T, range: &FieldRange) -> std::result::Result<T, String>
where
    T: FromStr + Into<f64> + Copy,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    let value: T = trimmed
        .parse()
        .map_err(|_| format!("'{}' is not a valid {}", trimmed, range.label))?;
    if !range.contains(value.into()) {
        return Err(format!(
            "{} must be between {} and {}",
            range.label, range.min, range.max
        ));
    }
    Ok(value)
}

/// Parse a target answer: menu number, short name or label
pub fn parse_target_choice(input: &str, default: DiseaseTarget) -> std::result::Result<DiseaseTarget, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    if let Ok(index) = trimmed.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| DiseaseTarget::ALL.get(i).copied())
            .ok_or_else(|| format!("Choose a number between 1 and {}", DiseaseTarget::ALL.len()));
    }
    trimmed.parse().map_err(|e: crate::errors::ScreeningError| e.to_string())
}

/// Parse a yes/no answer; anything but y/yes is no
pub fn parse_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Prompts for a complete screening form
pub struct FormPrompter {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl FormPrompter {
    /// Create new prompter
    pub fn new() -> Result<Self> {
        Ok(FormPrompter {
            editor: DefaultEditor::new()?,
            history_path: None,
        })
    }

    /// Create prompter with persistent history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(FormPrompter {
            editor,
            history_path: Some(history_file),
        })
    }

    /// Read one line; None on Ctrl-C or Ctrl-D
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }
                Ok(Some(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }

    fn ask<T>(&mut self, range: &FieldRange, default: T) -> Result<Option<T>>
    where
        T: FromStr + Into<f64> + Copy + Display,
    {
        let prompt = format!(
            "{} [{}] ({}-{}): ",
            range.label,
            default,
            range.min,
            range.max
        );
        loop {
            let Some(answer) = self.read_line(&prompt)? else {
                return Ok(None);
            };
            match parse_field(&answer, default, range) {
                Ok(value) => return Ok(Some(value)),
                Err(msg) => println!("{}", msg.yellow()),
            }
        }
    }

    fn ask_target(&mut self) -> Result<Option<DiseaseTarget>> {
        println!("Screening For:");
        for (i, target) in DiseaseTarget::ALL.iter().enumerate() {
            println!("  {}) {}", i + 1, target.label());
        }
        let prompt = format!("Choice [{}]: ", FORM_DEFAULTS.target.label());
        loop {
            let Some(answer) = self.read_line(&prompt)? else {
                return Ok(None);
            };
            match parse_target_choice(&answer, FORM_DEFAULTS.target) {
                Ok(target) => return Ok(Some(target)),
                Err(msg) => println!("{}", msg.yellow()),
            }
        }
    }

    /// Ask a yes/no question; None on Ctrl-C or Ctrl-D
    pub fn confirm(&mut self, question: &str) -> Result<Option<bool>> {
        Ok(self
            .read_line(&format!("{} [y/N]: ", question))?
            .map(|answer| parse_yes(&answer)))
    }

    /// Walk through every field. None means the user cancelled.
    pub fn read_form(&mut self) -> Result<Option<ScreeningForm>> {
        let Some(name) = self.read_line("Full Name: ")? else {
            return Ok(None);
        };
        let Some(age) = self.ask(&AGE_RANGE, FORM_DEFAULTS.age)? else {
            return Ok(None);
        };
        let Some(target) = self.ask_target()? else {
            return Ok(None);
        };
        let Some(bmi) = self.ask(&BMI_RANGE, FORM_DEFAULTS.bmi)? else {
            return Ok(None);
        };
        let Some(glucose) = self.ask(&GLUCOSE_RANGE, FORM_DEFAULTS.glucose)? else {
            return Ok(None);
        };
        let Some(blood_pressure) = self.ask(&BP_RANGE, FORM_DEFAULTS.blood_pressure)? else {
            return Ok(None);
        };
        let Some(heart_rate) = self.ask(&HR_RANGE, FORM_DEFAULTS.heart_rate)? else {
            return Ok(None);
        };
        let Some(temperature) = self.ask(&TEMP_RANGE, FORM_DEFAULTS.temperature)? else {
            return Ok(None);
        };
        let Some(certified) = self.confirm("I certify the input is correct")? else {
            return Ok(None);
        };

        Ok(Some(ScreeningForm {
            name,
            age,
            target: target.short_name().to_string(),
            bmi,
            glucose,
            blood_pressure,
            heart_rate,
            temperature,
            certified,
        }))
    }

    /// Save history to disk
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor.save_history(path)?;
        }
        Ok(())
    }
}
