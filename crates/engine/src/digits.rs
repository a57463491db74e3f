//! Decimal digit extraction
//!
//! Turns the converged value into the fractional digits after "3.". Both
//! steps are pure and allocate fresh strings: [`render_fixed`] writes the
//! value in fixed notation with a truncated fraction, and
//! [`strip_integer_part`] drops everything through the decimal point and cuts
//! the remainder to the requested length.

use crate::error::EngineError;
use rug::float::Round;
use rug::ops::Pow;
use rug::{Float, Integer};

/// Exact-length sequence of ASCII decimal digits.
///
/// Holds exactly the number of digits the caller requested; never more,
/// never less, and nothing but '0'..='9'.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigitString(String);

impl DigitString {
    /// The digits as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first `count` digits (all of them if `count` exceeds the length)
    pub fn prefix(&self, count: usize) -> &str {
        &self.0[..count.min(self.0.len())]
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DigitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DigitString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Render `value` as `"<integer>.<fraction>"` with exactly `fraction_digits`
/// fractional digits.
///
/// Digits past `fraction_digits` are discarded, not rounded. The value must
/// be finite.
pub fn render_fixed(value: &Float, fraction_digits: usize) -> Result<String, EngineError> {
    let exponent = u32::try_from(fraction_digits).map_err(|_| {
        EngineError::ResourceExhausted(format!(
            "cannot render {} fractional digits",
            fraction_digits
        ))
    })?;

    let scale = Integer::from(10u32).pow(exponent);
    let mut scaled = value.clone();
    scaled *= &scale;

    let (truncated, _) = scaled.to_integer_round(Round::Zero).ok_or_else(|| {
        EngineError::ResourceExhausted(
            "value is not finite at the working precision".to_string(),
        )
    })?;

    let negative = truncated.is_negative();
    let magnitude = truncated.abs().to_string();

    // Left-pad so at least one integer digit precedes the point
    let padding = (fraction_digits + 1).saturating_sub(magnitude.len());
    let total = padding + magnitude.len();
    let integer_len = total - fraction_digits;

    let mut rendered = String::new();
    rendered.try_reserve_exact(total + 2)?;
    if negative {
        rendered.push('-');
    }
    let mut padded = std::iter::repeat_n('0', padding).chain(magnitude.chars());
    rendered.extend(padded.by_ref().take(integer_len));
    rendered.push('.');
    rendered.extend(padded);

    Ok(rendered)
}

/// Drop the integer part and decimal point of `rendered`, then truncate to
/// exactly `digits` characters.
///
/// Fails with [`EngineError::InvalidRequest`] when `digits` is zero or the
/// rendering cannot supply that many: `requested` is `digits` and `max` is the
/// number of fractional digits the rendering actually carries (0 when it has
/// no point).
pub fn strip_integer_part(rendered: &str, digits: usize) -> Result<DigitString, EngineError> {
    let fraction = match rendered.find('.') {
        Some(dot) => &rendered[dot + 1..],
        None => "",
    };

    let available = fraction
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 || available < digits {
        return Err(EngineError::InvalidRequest {
            requested: digits as u64,
            max: available as u64,
        });
    }

    let mut out = String::new();
    out.try_reserve_exact(digits)?;
    out.push_str(&fraction[..digits]);
    Ok(DigitString(out))
}
