//! Precision planning
//!
//! Maps a requested number of decimal digits to the binary working precision
//! the engine runs at. The fixed additive margin absorbs the rounding error
//! accumulated by the iteration and by the final decimal conversion.

use crate::error::EngineError;

/// Largest digit count accepted by the engine
pub const MAX_DIGITS: u64 = 10_000_000;

/// Extra bits carried on top of `digits * log2(10)`
///
/// Tunable; validated by the digit tests rather than derived.
pub const MARGIN_BITS: u32 = 10_000;

/// Binary digits per decimal digit
pub const LOG2_10: f64 = std::f64::consts::LOG2_10;

/// A validated computation request together with its working precision.
///
/// Only obtainable through [`plan`], so holding a `Plan` means the digit count
/// is within `1..=MAX_DIGITS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    digits: u64,
    precision_bits: u32,
}

impl Plan {
    /// Requested number of decimal digits after the point
    pub fn digits(&self) -> u64 {
        self.digits
    }

    /// Working precision in bits shared by every value of the run
    pub fn precision_bits(&self) -> u32 {
        self.precision_bits
    }
}

/// Plan a computation of `digits` decimal digits.
pub fn plan(digits: u64) -> Result<Plan, EngineError> {
    if digits == 0 || digits > MAX_DIGITS {
        return Err(EngineError::InvalidRequest {
            requested: digits,
            max: MAX_DIGITS,
        });
    }

    // digits <= MAX_DIGITS keeps this far inside f64's exact integer range
    let binary_digits = (digits as f64 * LOG2_10).ceil() as u64;
    let precision = binary_digits + u64::from(MARGIN_BITS);

    let max_precision = u64::from(rug::float::prec_max());
    if precision > max_precision {
        return Err(EngineError::ResourceExhausted(format!(
            "working precision of {} bits exceeds the arithmetic limit of {} bits",
            precision, max_precision
        )));
    }

    Ok(Plan {
        digits,
        precision_bits: precision as u32,
    })
}
