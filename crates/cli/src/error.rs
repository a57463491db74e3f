//! Error type for the command-line application.

use superpi_engine::EngineError;

/// Anything that can stop a SuperPi run.
#[derive(Debug)]
pub enum CliError {
    /// Invalid configuration file, environment value or flag combination
    Config(String),
    /// The engine rejected the request or ran out of resources
    Engine(EngineError),
    /// Writing the result file or the report failed
    Io(std::io::Error),
    /// Continuous mode produced digits that disagree between rounds
    Inconsistent { mismatches: u32 },
}

impl CliError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 1,
            CliError::Engine(e) if e.is_invalid_request() => 1,
            CliError::Engine(_) => 2,
            CliError::Io(_) => 2,
            CliError::Inconsistent { .. } => 3,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Inconsistent { mismatches } => write!(
                f,
                "{} round(s) produced digits inconsistent with the previous round; \
                 the CPU may be unstable",
                mismatches
            ),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Engine(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        CliError::Engine(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
