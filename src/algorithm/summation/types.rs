//! Types for series summation
//!
//! Contains the summand contract, range bounds and engine options.

use super::summable::Summable;
use crate::error::Result;

// ============================================================================
// Summands
// ============================================================================

/// A term generator `m ↦ f(m)` for a series
///
/// Any `Fn(i64) -> R` with a [`Summable`] result is a summand. Generators
/// that can fail are wrapped in [`TryTerms`].
pub trait Summand {
    /// Domain of the terms and of the sum
    type Output: Summable;

    /// The term at index `m`
    fn term(&self, m: i64) -> Result<Self::Output>;
}

impl<F, R> Summand for F
where
    F: Fn(i64) -> R,
    R: Summable,
{
    type Output = R;

    #[inline]
    fn term(&self, m: i64) -> Result<R> {
        Ok(self(m))
    }
}

/// Adapter for a fallible term generator
///
/// The first error raised by the generator aborts the summation and is
/// returned unchanged.
#[derive(Debug, Clone, Copy)]
pub struct TryTerms<F>(pub F);

impl<F, R> Summand for TryTerms<F>
where
    F: Fn(i64) -> Result<R>,
    R: Summable,
{
    type Output = R;

    #[inline]
    fn term(&self, m: i64) -> Result<R> {
        (self.0)(m)
    }
}

// ============================================================================
// Range bounds
// ============================================================================

/// One end of a summation range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SumBound {
    /// −∞ (valid as a start only)
    NegInfinity,
    /// A finite index, inclusive
    Finite(i64),
    /// +∞ (valid as an end only)
    PosInfinity,
}

impl From<i64> for SumBound {
    fn from(m: i64) -> Self {
        Self::Finite(m)
    }
}

impl From<i32> for SumBound {
    fn from(m: i32) -> Self {
        Self::Finite(i64::from(m))
    }
}

// ============================================================================
// Options
// ============================================================================

/// Tuning of the infinite-tail engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummationOptions {
    /// Relative change between successive estimates counted as converged
    pub convergence_limit: f64,
    /// Base terms evaluated before giving up on one tail
    pub max_terms: usize,
    /// Consecutive converged steps needed to stop
    pub converged_run: usize,
    /// Consecutive worsening steps tolerated; one more is a failure
    pub diverged_run: usize,
}

impl Default for SummationOptions {
    fn default() -> Self {
        Self {
            convergence_limit: 1e-14,
            max_terms: 100_000,
            converged_run: 2,
            diverged_run: 3,
        }
    }
}

impl SummationOptions {
    /// Override the convergence limit
    pub fn with_convergence_limit(mut self, limit: f64) -> Self {
        self.convergence_limit = limit;
        self
    }

    /// Override the term cap
    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }
}
