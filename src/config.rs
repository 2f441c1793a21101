//! Configuration handling for datagate

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use termcolor::ColorChoice;

use crate::check::{default_descriptors, CheckDescriptor};

/// Output format for gate reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Html,
}

/// Check configuration file: `{"expectations": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    pub expectations: Vec<CheckDescriptor>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            expectations: default_descriptors(),
        }
    }
}

impl CheckConfig {
    /// Parse a check configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid check configuration")
    }

    /// Load a check configuration file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read check configuration: {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to load check configuration: {}", path.display()))
    }
}

/// Configuration for a gate run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the source-of-truth dataset
    pub source_file: PathBuf,
    /// Path to the dataset under test
    pub target_file: PathBuf,
    /// Column used to align rows
    pub primary_key: String,
    /// Output format
    pub output_format: OutputFormat,
    /// Checks to run
    pub checks: CheckConfig,
    /// Report key mismatches in either direction
    pub strict_key_match: bool,
    /// Color usage for terminal output
    pub color: ColorChoice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_file: PathBuf::new(),
            target_file: PathBuf::new(),
            primary_key: String::from("id"),
            output_format: OutputFormat::default(),
            checks: CheckConfig::default(),
            strict_key_match: false,
            color: ColorChoice::Auto,
        }
    }
}

impl Config {
    /// Create a new Config with file paths
    pub fn new(source_file: PathBuf, target_file: PathBuf) -> Self {
        Self {
            source_file,
            target_file,
            ..Default::default()
        }
    }

    /// Set the primary key column
    pub fn with_primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_key = key.into();
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Replace the check list
    pub fn with_checks(mut self, checks: CheckConfig) -> Self {
        self.checks = checks;
        self
    }

    /// Enable strict key matching
    pub fn with_strict_key_match(mut self, strict: bool) -> Self {
        self.strict_key_match = strict;
        self
    }

    /// Set color usage for terminal output
    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}
