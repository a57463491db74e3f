//! Digit count arguments
//!
//! Accepts plain integers and a few shorthands:
//!
//! | Input   | Digits        |
//! |---------|---------------|
//! | `12345` | 12,345        |
//! | `10K`   | 10,000        |
//! | `1M`    | 1,000,000     |
//! | `1G`    | 1,000,000,000 |
//! | `1e6`   | 1,000,000     |
//!
//! Suffixes are case-insensitive and `_` may separate digit groups. Range
//! checks are left to the engine, which knows its supported maximum.

/// Parse a digit count such as `"1000000"`, `"1M"` or `"1e6"`.
pub fn parse_digit_count(spec: &str) -> Result<u64, String> {
    let s: String = spec.trim().chars().filter(|&c| c != '_').collect();
    if s.is_empty() {
        return Err("digit count cannot be empty".to_string());
    }

    if let Some((mantissa, exponent)) = s.split_once(['e', 'E']) {
        let mantissa: u64 = mantissa
            .parse()
            .map_err(|_| format!("invalid mantissa in \"{}\"", spec))?;
        let exponent: u32 = exponent
            .parse()
            .map_err(|_| format!("invalid exponent in \"{}\"", spec))?;
        return 10u64
            .checked_pow(exponent)
            .and_then(|scale| mantissa.checked_mul(scale))
            .ok_or_else(|| format!("digit count \"{}\" is too large", spec));
    }

    let (number, multiplier) = match s.chars().last().map(|c| c.to_ascii_uppercase()) {
        Some('K') => (&s[..s.len() - 1], 1_000),
        Some('M') => (&s[..s.len() - 1], 1_000_000),
        Some('G') => (&s[..s.len() - 1], 1_000_000_000),
        _ => (s.as_str(), 1),
    };

    if number.is_empty() {
        return Err(format!("missing number before suffix in \"{}\"", spec));
    }

    let base: u64 = number
        .parse()
        .map_err(|_| format!("invalid digit count \"{}\"", spec))?;
    base.checked_mul(multiplier)
        .ok_or_else(|| format!("digit count \"{}\" is too large", spec))
}
