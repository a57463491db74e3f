//! SuperPi
//!
//! Command-line front end for [`superpi_engine`]: argument and configuration
//! handling, progress output, result files, run reports, and a continuous
//! mode for keeping a CPU under sustained load.

pub mod app;
pub mod cli;
pub mod config;
pub mod continuous;
pub mod digit_count;
pub mod error;
pub mod output;
pub mod progress;
pub mod report;
pub mod signal;

pub use app::App;
pub use cli::Cli;
pub use config::SuperPiConfig;
pub use error::CliError;
