//! Engine error types.

use crate::planner::MAX_DIGITS;

/// Error type for pi computations.
///
/// Only two kinds exist: the algorithm always converges for a valid request
/// given enough memory, so there is no "failed to converge" outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The requested digit count is zero or more than can be served.
    InvalidRequest {
        /// Digit count that was asked for
        requested: u64,
        /// Largest digit count that can be served: [`MAX_DIGITS`] from the
        /// planner, or the digits a rendering carries from
        /// [`strip_integer_part`](crate::digits::strip_integer_part)
        max: u64,
    },
    /// Memory for the working precision or the result buffer is unavailable.
    ResourceExhausted(String),
}

impl EngineError {
    /// True for errors detected before any computation started
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, EngineError::InvalidRequest { .. })
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidRequest { requested: 0, .. } => {
                write!(f, "invalid digit count: at least 1 digit is required")
            }
            EngineError::InvalidRequest {
                requested,
                max: MAX_DIGITS,
            } => write!(
                f,
                "invalid digit count: {} exceeds the supported maximum of {}",
                requested, MAX_DIGITS
            ),
            EngineError::InvalidRequest { requested, max } => write!(
                f,
                "invalid digit count: {} exceeds the {} digits available",
                requested, max
            ),
            EngineError::ResourceExhausted(what) => write!(f, "resource exhausted: {}", what),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<std::collections::TryReserveError> for EngineError {
    fn from(e: std::collections::TryReserveError) -> Self {
        EngineError::ResourceExhausted(format!("result buffer allocation failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_zero_digits() {
        let err = EngineError::InvalidRequest {
            requested: 0,
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "invalid digit count: at least 1 digit is required"
        );
        assert!(err.is_invalid_request());
    }

    #[test]
    fn test_display_too_many_digits() {
        let err = EngineError::InvalidRequest {
            requested: MAX_DIGITS + 1,
            max: MAX_DIGITS,
        };
        assert_eq!(
            err.to_string(),
            format!(
                "invalid digit count: {} exceeds the supported maximum of {}",
                MAX_DIGITS + 1,
                MAX_DIGITS
            )
        );
    }

    #[test]
    fn test_try_reserve_maps_to_resource_exhausted() {
        let mut buf: Vec<u8> = Vec::new();
        let reserve_err = buf.try_reserve_exact(usize::MAX).unwrap_err();
        let err = EngineError::from(reserve_err);
        assert!(!err.is_invalid_request());
        assert!(matches!(err, EngineError::ResourceExhausted(_)));
    }
}
