//! Pi Engine
//!
//! Runs the Gauss-Legendre iteration at a planned precision until the two
//! means agree, then extracts the decimal digits.
//!
//! # States
//!
//! - **Init** - seed the four working variables
//! - **Iterate** - replace the state with the next one
//! - **ConvergenceCheck** - stop once `|a - b| < 2^-(precision/2)`
//! - **Finalize** - evaluate `(a + b)^2 / (4t)` and extract digits
//!
//! The digit count roughly doubles with every step, so a request for `D`
//! digits takes `O(log2 D)` iterations.
//!
//! Progress milestones are advisory: observers see how far the computation
//! got and how long it took, and cannot influence the result.

use crate::digits::{DigitString, render_fixed, strip_integer_part};
use crate::error::EngineError;
use crate::iteration::IterationState;
use crate::planner::Plan;
use rug::Float;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// log10(2), converts a binary exponent into decimal digits
const LOG10_2: f64 = std::f64::consts::LOG10_2;

/// Smallest digit count reported as a milestone
pub const FIRST_MILESTONE: u64 = 128;

/// A progress report, fired whenever the estimated number of converged
/// digits crosses a new power of two, starting at [`FIRST_MILESTONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    /// The power-of-two digit count that was crossed
    pub digits: u64,
    /// Iteration after which the crossing was observed
    pub iteration: u32,
    /// Time since the computation started
    pub elapsed: Duration,
}

/// Receives [`Milestone`]s during a computation.
pub trait ProgressObserver {
    fn on_milestone(&mut self, milestone: &Milestone);
}

impl<F: FnMut(&Milestone)> ProgressObserver for F {
    fn on_milestone(&mut self, milestone: &Milestone) {
        self(milestone)
    }
}

/// Outcome of a successful computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computation {
    /// Exactly `plan.digits()` decimal digits after "3."
    pub digits: DigitString,
    /// Iterations run before convergence
    pub iterations: u32,
    /// Working precision the run used
    pub precision_bits: u32,
}

/// Executes one planned computation.
#[derive(Debug, Clone, Copy)]
pub struct PiEngine {
    plan: Plan,
}

impl PiEngine {
    pub fn new(plan: Plan) -> Self {
        PiEngine { plan }
    }

    /// Run to convergence and extract the digits.
    ///
    /// Blocking and single-threaded. All intermediate values are dropped
    /// before returning, on success and on failure.
    pub fn run(&self, observer: &mut dyn ProgressObserver) -> Result<Computation, EngineError> {
        let start = Instant::now();
        let prec = self.plan.precision_bits();
        let requested = self.plan.digits();

        info!(
            digits = requested,
            precision_bits = prec,
            "starting pi computation"
        );

        let threshold = convergence_threshold(prec);
        let mut reported = 0u64;
        let mut state = IterationState::new(prec);

        loop {
            state = state.step();
            debug_assert!(state.is_finite());

            let gap = state.gap();
            let estimate = estimated_digits(&gap, requested);
            debug!(
                iteration = state.iteration(),
                gap_exp = ?gap.get_exp(),
                estimated_digits = estimate,
                "iteration complete"
            );

            if let Some(milestone) = highest_power_of_two(estimate)
                .filter(|&m| m >= FIRST_MILESTONE && m > reported)
            {
                reported = milestone;
                observer.on_milestone(&Milestone {
                    digits: milestone,
                    iteration: state.iteration(),
                    elapsed: start.elapsed(),
                });
            }

            if gap < threshold {
                break;
            }
        }

        let iterations = state.iteration();
        let pi = state.finalize();
        let digits = extract_digits(&pi, requested)?;

        info!(
            digits = requested,
            iterations,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "pi computation converged"
        );

        Ok(Computation {
            digits,
            iterations,
            precision_bits: prec,
        })
    }
}

/// 2^-(prec/2): below this gap the finalized value is accurate to about
/// `prec` bits.
fn convergence_threshold(prec: u32) -> Float {
    let mut threshold = Float::with_val(prec, 1u32);
    threshold >>= prec / 2;
    threshold
}

/// Digits the finalized value would carry for the given gap, capped at the
/// request. The error after finalizing is of the order of `gap^2`.
fn estimated_digits(gap: &Float, requested: u64) -> u64 {
    if gap.is_zero() {
        return requested;
    }
    match gap.get_exp() {
        Some(exp) if exp < 0 => {
            let digits = (2.0 * f64::from(-exp) * LOG10_2) as u64;
            digits.min(requested)
        }
        _ => 0,
    }
}

fn highest_power_of_two(n: u64) -> Option<u64> {
    if n == 0 {
        None
    } else {
        Some(1u64 << (63 - n.leading_zeros()))
    }
}

/// Render with one guard digit past the request, then cut to length.
fn extract_digits(pi: &Float, requested: u64) -> Result<DigitString, EngineError> {
    let digits = usize::try_from(requested).map_err(|_| EngineError::InvalidRequest {
        requested,
        max: usize::MAX as u64,
    })?;
    let rendered = render_fixed(pi, digits + 1)?;
    strip_integer_part(&rendered, digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan;

    #[test]
    fn test_highest_power_of_two() {
        assert_eq!(highest_power_of_two(0), None);
        assert_eq!(highest_power_of_two(1), Some(1));
        assert_eq!(highest_power_of_two(3), Some(2));
        assert_eq!(highest_power_of_two(1024), Some(1024));
        assert_eq!(highest_power_of_two(1500), Some(1024));
    }

    #[test]
    fn test_estimated_digits() {
        let gap = Float::with_val(64, 0.5f64);
        assert_eq!(estimated_digits(&gap, 100), 0);

        // 2^-100 has exponent -99: about 2 * 99 * 0.301 = 59 digits
        let mut gap = Float::with_val(64, 1u32);
        gap >>= 100u32;
        assert_eq!(estimated_digits(&gap, 1_000), 59);
        assert_eq!(estimated_digits(&gap, 10), 10);

        let zero = Float::new(64);
        assert_eq!(estimated_digits(&zero, 42), 42);
    }

    #[test]
    fn test_threshold_halves_precision() {
        let threshold = convergence_threshold(10_034);
        // 2^-5017 is stored as 0.5 * 2^-5016
        assert_eq!(threshold.get_exp(), Some(-5016));
    }

    #[test]
    fn test_run_reports_increasing_milestones() {
        let engine = PiEngine::new(plan(200).unwrap());
        let mut seen = Vec::new();
        let result = engine
            .run(&mut |m: &Milestone| seen.push(*m))
            .unwrap();

        assert_eq!(result.digits.len(), 200);
        assert!(!seen.is_empty());
        for pair in seen.windows(2) {
            assert!(pair[0].digits < pair[1].digits);
            assert!(pair[0].iteration < pair[1].iteration);
            assert!(pair[0].elapsed <= pair[1].elapsed);
        }
        for m in &seen {
            assert!(m.digits.is_power_of_two());
            assert!((FIRST_MILESTONE..=200).contains(&m.digits));
        }
        assert_eq!(seen.last().map(|m| m.digits), Some(128));
    }

    #[test]
    fn test_small_requests_report_no_milestones() {
        let mut seen = Vec::new();
        let result = PiEngine::new(plan(100).unwrap())
            .run(&mut |m: &Milestone| seen.push(*m))
            .unwrap();
        assert_eq!(result.digits.len(), 100);
        assert!(seen.is_empty());
    }

    #[test]
    fn test_milestones_start_at_first_milestone() {
        let mut seen = Vec::new();
        PiEngine::new(plan(2_000).unwrap())
            .run(&mut |m: &Milestone| seen.push(m.digits))
            .unwrap();
        assert_eq!(seen.first(), Some(&FIRST_MILESTONE));
        assert!(seen.iter().all(|&d| d >= FIRST_MILESTONE));
        assert_eq!(seen.last(), Some(&1_024));
    }

    #[test]
    fn test_run_reports_precision() {
        let plan = plan(50).unwrap();
        let result = PiEngine::new(plan).run(&mut |_: &Milestone| {}).unwrap();
        assert_eq!(result.precision_bits, plan.precision_bits());
        assert!(result.iterations > 0);
    }
}
