//! SuperPi Engine
//!
//! Computes the decimal digits of pi to a requested length with the
//! quadratically convergent Gauss-Legendre algorithm.
//!
//! ```rust,ignore
//! let digits = superpi_engine::compute(20)?;
//! assert_eq!(digits.as_str(), "14159265358979323846");
//! ```
//!
//! A computation is planned first ([`planner::plan`]), which validates the
//! digit count and derives the working precision, and then executed by a
//! [`PiEngine`]. Every arbitrary precision value is created with that
//! precision passed explicitly, so independent computations cannot interfere.

pub mod digits;
pub mod engine;
pub mod error;
pub mod iteration;
pub mod planner;

pub use digits::DigitString;
pub use engine::{Computation, Milestone, PiEngine, ProgressObserver};
pub use error::EngineError;
pub use planner::{MAX_DIGITS, Plan, plan};

/// Name of the algorithm, as recorded in result files
pub const ALGORITHM_NAME: &str = "Gauss-Legendre";

/// Compute the first `digits` decimal digits of pi after "3.".
pub fn compute(digits: u64) -> Result<DigitString, EngineError> {
    compute_with_progress(digits, &mut |_: &Milestone| {}).map(|c| c.digits)
}

/// Compute the first `digits` decimal digits of pi, reporting milestones to
/// `observer`.
///
/// Invalid requests are rejected before any arbitrary precision value is
/// allocated.
pub fn compute_with_progress(
    digits: u64,
    observer: &mut dyn ProgressObserver,
) -> Result<Computation, EngineError> {
    let plan = plan(digits)?;
    PiEngine::new(plan).run(observer)
}
