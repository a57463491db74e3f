//! Gauss-Legendre iteration state
//!
//! ```text
//! a0 = 1      b0 = 1/sqrt(2)      t0 = 1/4      p0 = 1
//!
//! a' = (a + b) / 2
//! b' = sqrt(a * b)
//! t' = t - p * (a - a')^2
//! p' = 2 * p
//!
//! pi ~= (a + b)^2 / (4 * t)
//! ```
//!
//! Each value is created with the run's precision passed explicitly, so two
//! computations never share precision state.

use rug::Float;

/// The four working variables after `iteration` steps.
#[derive(Debug, Clone)]
pub struct IterationState {
    prec: u32,
    a: Float,
    b: Float,
    t: Float,
    p: Float,
    iteration: u32,
}

impl IterationState {
    /// Seed the state at `prec` bits of precision.
    pub fn new(prec: u32) -> Self {
        let a = Float::with_val(prec, 1u32);
        let b = Float::with_val(prec, 2u32).sqrt().recip();
        let t = Float::with_val(prec, 0.25f64);
        let p = Float::with_val(prec, 1u32);
        IterationState {
            prec,
            a,
            b,
            t,
            p,
            iteration: 0,
        }
    }

    /// Compute the next state. `self` is left untouched.
    pub fn step(&self) -> IterationState {
        let prec = self.prec;

        let mut a = Float::with_val(prec, &self.a + &self.b);
        a /= 2u32;

        let b = Float::with_val(prec, &self.a * &self.b).sqrt();

        let diff = Float::with_val(prec, &self.a - &a).square();
        let correction = Float::with_val(prec, &self.p * &diff);
        let t = Float::with_val(prec, &self.t - &correction);

        let p = Float::with_val(prec, &self.p * 2u32);

        IterationState {
            prec,
            a,
            b,
            t,
            p,
            iteration: self.iteration + 1,
        }
    }

    /// |a - b|, the distance between the two means
    pub fn gap(&self) -> Float {
        Float::with_val(self.prec, &self.a - &self.b).abs()
    }

    /// Steps taken since the seed state
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// True when every working variable is a finite number
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.t.is_finite() && self.p.is_finite()
    }

    /// Evaluate (a + b)^2 / (4t), consuming the state.
    pub fn finalize(self) -> Float {
        let prec = self.prec;
        let numerator = Float::with_val(prec, &self.a + &self.b).square();
        let denominator = Float::with_val(prec, &self.t * 4u32);
        Float::with_val(prec, &numerator / &denominator)
    }
}
