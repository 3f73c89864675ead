//! Plain partial sums

use super::summable::Summable;
use super::types::Summand;
use crate::error::{Error, Result};

/// A sequence of estimates of a series' value
///
/// Each [`advance`](Summation::advance) pulls exactly one more term from
/// the underlying summand. Accelerating transforms wrap another
/// `Summation` and expose it through [`inner`](Summation::inner).
pub trait Summation {
    /// Domain of the estimates
    type Output: Summable;

    /// Consume one more term of the series
    fn advance(&mut self) -> Result<()>;

    /// The current estimate, once enough terms have been seen
    fn value(&self) -> Option<&Self::Output>;

    /// Whether the last step hit a zero denominator at this level or below
    fn had_divide_by_zero(&self) -> bool;

    /// The wrapped sequence; `None` for plain partial sums
    fn inner(&self) -> Option<&dyn Summation<Output = Self::Output>>;

    /// Terms evaluated so far
    fn terms(&self) -> usize;
}

/// Running partial sums `f(m0) + f(m0 + s) + f(m0 + 2s) + …` with `s = ±1`
pub struct BasicSummation<'a, F: Summand + ?Sized> {
    summand: &'a F,
    next: Option<i64>,
    step: i64,
    value: Option<F::Output>,
    terms: usize,
}

impl<'a, F: Summand + ?Sized> BasicSummation<'a, F> {
    /// Partial sums starting at index `start`, walking upwards when `sign`
    /// is non-negative and downwards otherwise
    pub fn new(summand: &'a F, start: i64, sign: i64) -> Self {
        Self {
            summand,
            next: Some(start),
            step: if sign < 0 { -1 } else { 1 },
            value: None,
            terms: 0,
        }
    }
}

impl<F: Summand + ?Sized> Summation for BasicSummation<'_, F> {
    type Output = F::Output;

    fn advance(&mut self) -> Result<()> {
        let m = self
            .next
            .ok_or_else(|| Error::invalid_parameter("index", "summation index overflowed i64"))?;
        let term = self.summand.term(m)?;
        self.value = Some(match self.value.take() {
            Some(sum) => sum.accumulate(&term)?,
            None => term,
        });
        self.next = m.checked_add(self.step);
        self.terms += 1;
        Ok(())
    }

    #[inline]
    fn value(&self) -> Option<&F::Output> {
        self.value.as_ref()
    }

    #[inline]
    fn had_divide_by_zero(&self) -> bool {
        false
    }

    #[inline]
    fn inner(&self) -> Option<&dyn Summation<Output = F::Output>> {
        None
    }

    #[inline]
    fn terms(&self) -> usize {
        self.terms
    }
}
