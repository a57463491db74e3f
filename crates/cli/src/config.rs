//! SuperPi configuration
//!
//! Settings come from, in increasing priority:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config PATH`, or `superpi.toml` in the working
//!    directory when present)
//! 3. Environment variables
//! 4. Command-line flags
//!
//! ## Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SUPERPI_OUTPUT_DIR` | Directory result files are written to |
//! | `SUPERPI_REPORT` | Report format: `human` or `json` |
//!
//! ## Example
//!
//! ```toml
//! default_digits = 1000000
//! output_dir = "results"
//! file_prefix = "pi"
//! report = "json"
//!
//! [continuous]
//! start_digits = 1000
//! growth_factor = 2
//! max_digits = 10000000
//! max_rounds = 0
//! ```

use crate::report::ReportFormat;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use superpi_engine::MAX_DIGITS;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "superpi.toml";

/// Environment variable overriding `output_dir`
pub const ENV_OUTPUT_DIR: &str = "SUPERPI_OUTPUT_DIR";

/// Environment variable overriding `report`
pub const ENV_REPORT: &str = "SUPERPI_REPORT";

/// Digits computed when none are given on the command line
pub const DEFAULT_DIGITS: u64 = 1_000_000;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuperPiConfig {
    pub default_digits: u64,
    pub output_dir: PathBuf,
    /// Result files are named `<file_prefix>_<digits>.txt`
    pub file_prefix: String,
    /// Write result files at all
    pub save: bool,
    pub report: ReportFormat,
    pub continuous: ContinuousConfig,
}

impl Default for SuperPiConfig {
    fn default() -> Self {
        SuperPiConfig {
            default_digits: DEFAULT_DIGITS,
            output_dir: PathBuf::from("."),
            file_prefix: "pi".to_string(),
            save: true,
            report: ReportFormat::Human,
            continuous: ContinuousConfig::default(),
        }
    }
}

/// Continuous mode: repeated computations at growing digit counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContinuousConfig {
    pub start_digits: u64,
    /// Each round multiplies the digit count by this factor
    pub growth_factor: u64,
    /// Digit count at which growth stops; later rounds repeat it
    pub max_digits: u64,
    /// Stop after this many rounds (0 runs until interrupted)
    pub max_rounds: u32,
}

impl Default for ContinuousConfig {
    fn default() -> Self {
        ContinuousConfig {
            start_digits: 1_000,
            growth_factor: 2,
            max_digits: MAX_DIGITS,
            max_rounds: 0,
        }
    }
}

impl SuperPiConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] in
    /// the working directory if it exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
        Self::from_toml(&content).map_err(|e| format!("{}: {}", path.display(), e))
    }

    /// Apply `SUPERPI_*` environment variables on top of this configuration.
    pub fn apply_env(&mut self) -> Result<(), String> {
        if let Some(dir) = non_empty_var(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(report) = non_empty_var(ENV_REPORT) {
            self.report = report
                .parse()
                .map_err(|e| format!("{}: {}", ENV_REPORT, e))?;
        }
        Ok(())
    }

    /// Check values that deserialization alone cannot rule out.
    pub fn validate(&self) -> Result<(), String> {
        if self.file_prefix.is_empty() {
            return Err("file_prefix cannot be empty".to_string());
        }
        if self
            .file_prefix
            .chars()
            .any(|c| std::path::is_separator(c) || c == '\0')
        {
            return Err(format!(
                "file_prefix '{}' must not contain path separators",
                self.file_prefix
            ));
        }

        let c = &self.continuous;
        if c.start_digits == 0 {
            return Err("continuous.start_digits must be at least 1".to_string());
        }
        if c.growth_factor < 2 {
            return Err(format!(
                "continuous.growth_factor must be at least 2, got {}",
                c.growth_factor
            ));
        }
        if c.max_digits > MAX_DIGITS {
            return Err(format!(
                "continuous.max_digits ({}) exceeds the supported maximum of {}",
                c.max_digits, MAX_DIGITS
            ));
        }
        if c.start_digits > c.max_digits {
            return Err(format!(
                "continuous.start_digits ({}) exceeds continuous.max_digits ({})",
                c.start_digits, c.max_digits
            ));
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
