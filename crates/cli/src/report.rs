//! Run report
//!
//! Summarizes one computation once it finishes. Human output mirrors what
//! the tool prints interactively; JSON output is a single line for scripts
//! that collect benchmark results.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Human,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(ReportFormat::Human),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "unknown report format '{}' (expected 'human' or 'json')",
                other
            )),
        }
    }
}

/// Figures for a single computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub digits: u64,
    pub iterations: u32,
    pub precision_bits: u32,
    pub elapsed_secs: f64,
    pub digits_per_sec: f64,
    /// Result file, when one was written
    pub file: Option<PathBuf>,
}

impl RunReport {
    pub fn new(digits: u64, iterations: u32, precision_bits: u32, elapsed: Duration) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        let digits_per_sec = if elapsed_secs > 0.0 {
            digits as f64 / elapsed_secs
        } else {
            0.0
        };
        RunReport {
            digits,
            iterations,
            precision_bits,
            elapsed_secs,
            digits_per_sec,
            file: None,
        }
    }

    pub fn with_file(mut self, file: PathBuf) -> Self {
        self.file = Some(file);
        self
    }

    /// Human-readable lines, each newline-terminated
    pub fn render_human(&self) -> String {
        let mut out = format!(
            "Pi computation finished in {:.2} seconds ({} iterations)\n\
             Average performance: {:.2} digits/second\n",
            self.elapsed_secs, self.iterations, self.digits_per_sec
        );
        if let Some(file) = &self.file {
            out.push_str(&format!("Result saved to: {}\n", file.display()));
        }
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Write the report in `format` to `out`.
    pub fn emit(&self, format: ReportFormat, out: &mut dyn Write) -> std::io::Result<()> {
        match format {
            ReportFormat::Human => out.write_all(self.render_human().as_bytes()),
            ReportFormat::Json => {
                let json = self.to_json().map_err(std::io::Error::other)?;
                writeln!(out, "{}", json)
            }
        }
    }
}
