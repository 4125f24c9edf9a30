//! Configuration management for MediTrack
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.meditrack/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::artifacts::ArtifactLayout;
use crate::errors::{Result, ScreeningError};

/// Complete configuration for MediTrack
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Where screening artifacts are read from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    pub dir: String,
    pub extension: String,
    /// Keep loaded artifact pairs for the life of the process
    pub cache: bool,
}

/// Terminal output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub color_output: bool,
    pub show_vitals: bool,
    pub default_verbosity: String,
}

/// File system paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub state_dir: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: "artifacts".to_string(),
            extension: "json".to_string(),
            cache: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: true,
            show_vitals: true,
            default_verbosity: "normal".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_dir: "~/.meditrack".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ScreeningError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ScreeningError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// ~/.meditrack/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".meditrack").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.artifacts.dir.trim().is_empty() {
            return Err(ScreeningError::ConfigError(
                "artifacts.dir must not be empty".to_string(),
            ));
        }

        if self.artifacts.extension.contains('/') || self.artifacts.extension.contains('\\') {
            return Err(ScreeningError::ConfigError(format!(
                "Invalid artifact extension: {}",
                self.artifacts.extension
            )));
        }

        match self.display.default_verbosity.as_str() {
            "quiet" | "normal" | "verbose" | "very_verbose" => {}
            _ => {
                return Err(ScreeningError::ConfigError(format!(
                    "Invalid verbosity level: {}",
                    self.display.default_verbosity
                )))
            }
        }

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ScreeningError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Artifact layout, with `dir_override` taking precedence over the file
    pub fn artifact_layout(&self, dir_override: Option<&Path>) -> ArtifactLayout {
        let dir = match dir_override {
            Some(dir) => dir.to_path_buf(),
            None => Self::expand_path(&self.artifacts.dir),
        };
        ArtifactLayout::new(dir).with_extension(self.artifacts.extension.clone())
    }

    /// Get state directory path
    pub fn state_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.state_dir)
    }

    /// Interactive form history file
    pub fn history_file(&self) -> PathBuf {
        self.state_dir().join("form_history")
    }
}
