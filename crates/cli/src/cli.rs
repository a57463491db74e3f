//! Command-line arguments

use crate::config::SuperPiConfig;
use crate::digit_count::parse_digit_count;
use crate::error::CliError;
use crate::report::ReportFormat;
use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "superpi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "SuperPi - compute pi to millions of digits for CPU stability and performance testing",
    long_about = None
)]
#[command(after_help = "Examples:\n  \
    superpi 1000000    compute 1 million digits\n  \
    superpi 10M        compute 10 million digits\n  \
    superpi -c         run until interrupted, doubling the digits each round")]
pub struct Cli {
    /// Number of decimal digits to compute (e.g. 1000000, 1M, 1e6).
    /// In continuous mode, the digit count of the first round.
    #[arg(value_parser = parse_digit_count)]
    pub digits: Option<u64>,

    /// Keep computing at growing digit counts until interrupted
    #[arg(short, long)]
    pub continuous: bool,

    /// Directory result files are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (TOML); defaults to ./superpi.toml when present
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not write result files
    #[arg(long)]
    pub no_save: bool,

    /// Report format
    #[arg(long, value_enum)]
    pub report: Option<ReportFormat>,

    /// Do not print progress milestones
    #[arg(short, long)]
    pub quiet: bool,

    /// Log engine internals to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Build the effective configuration: file, then environment, then flags.
    pub fn load_config(&self) -> Result<SuperPiConfig, CliError> {
        let mut config = SuperPiConfig::load(self.config.as_deref()).map_err(CliError::Config)?;
        config.apply_env().map_err(CliError::Config)?;
        self.apply_overrides(&mut config);
        config.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Apply command-line flags on top of `config`.
    pub fn apply_overrides(&self, config: &mut SuperPiConfig) {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.no_save {
            config.save = false;
        }
        if let Some(report) = self.report {
            config.report = report;
        }
        if let (true, Some(digits)) = (self.continuous, self.digits) {
            config.continuous.start_digits = digits;
        }
    }

    /// Digits for a single run
    pub fn digits_or_default(&self, config: &SuperPiConfig) -> u64 {
        self.digits.unwrap_or(config.default_digits)
    }
}
