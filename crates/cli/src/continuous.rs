//! Continuous mode
//!
//! Runs computation after computation at growing digit counts, for as long
//! as the CPU should be kept busy. Each round is a complete, independent
//! `compute()` call; cancellation is only observed between rounds, so a
//! round that has started always runs to completion.
//!
//! Every round is checked against the previous one: the digits both rounds
//! have in common must agree. Pi does not change, so a disagreement means the
//! hardware produced a wrong result.

use crate::config::ContinuousConfig;
use crate::error::CliError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use superpi_engine::{DigitString, EngineError};
use tracing::{error, info};

/// Cooperative stop request shared with signal handlers.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// The underlying flag, for registration with signal handlers
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

/// Digit counts for successive rounds.
///
/// `start, start*g, start*g^2, ...` capped at `max`, after which `max`
/// repeats. Ends after `max_rounds` rounds unless that is 0.
#[derive(Debug, Clone)]
pub struct Schedule {
    next: u64,
    growth: u64,
    max: u64,
    remaining: Option<u32>,
}

impl Schedule {
    pub fn new(config: &ContinuousConfig) -> Self {
        Schedule {
            next: config.start_digits.min(config.max_digits),
            growth: config.growth_factor,
            max: config.max_digits,
            remaining: (config.max_rounds > 0).then_some(config.max_rounds),
        }
    }
}

impl Iterator for Schedule {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let current = self.next;
        self.next = current.saturating_mul(self.growth).min(self.max);
        Some(current)
    }
}

/// What happened in one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    /// 1-based round number
    pub round: u32,
    pub digits: u64,
    pub elapsed: Duration,
    /// Digits agree with the previous round's digits
    pub consistent: bool,
}

/// Totals once continuous mode stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub rounds: u32,
    pub mismatches: u32,
    /// Stopped by the cancel token rather than by the round limit
    pub cancelled: bool,
}

impl Summary {
    /// Turn recorded mismatches into an error
    pub fn into_result(self) -> Result<Summary, CliError> {
        if self.mismatches > 0 {
            Err(CliError::Inconsistent {
                mismatches: self.mismatches,
            })
        } else {
            Ok(self)
        }
    }
}

/// True when `a` and `b` agree on every digit both of them have
pub fn prefixes_agree(a: &DigitString, b: &DigitString) -> bool {
    let common = a.len().min(b.len());
    a.prefix(common) == b.prefix(common)
}

/// Drive rounds from `config` until the schedule ends or `token` is
/// cancelled.
///
/// `compute` performs one computation; `on_round` sees every finished round
/// (for printing and saving). Engine and `on_round` errors stop the loop.
pub fn run<C, R>(
    config: &ContinuousConfig,
    token: &CancelToken,
    mut compute: C,
    mut on_round: R,
) -> Result<Summary, CliError>
where
    C: FnMut(u64) -> Result<DigitString, EngineError>,
    R: FnMut(&RoundOutcome, &DigitString) -> Result<(), CliError>,
{
    let mut summary = Summary::default();
    let mut previous: Option<DigitString> = None;

    for digits in Schedule::new(config) {
        if token.is_cancelled() {
            summary.cancelled = true;
            break;
        }

        let start = Instant::now();
        let result = compute(digits)?;
        let elapsed = start.elapsed();

        let consistent = previous
            .as_ref()
            .is_none_or(|prev| prefixes_agree(prev, &result));
        summary.rounds += 1;
        if !consistent {
            summary.mismatches += 1;
            error!(
                round = summary.rounds,
                digits, "digits disagree with the previous round"
            );
        }

        let outcome = RoundOutcome {
            round: summary.rounds,
            digits,
            elapsed,
            consistent,
        };
        info!(
            round = outcome.round,
            digits,
            elapsed_ms = elapsed.as_millis() as u64,
            consistent,
            "round complete"
        );
        on_round(&outcome, &result)?;
        previous = Some(result);
    }

    if token.is_cancelled() {
        summary.cancelled = true;
    }
    Ok(summary)
}
