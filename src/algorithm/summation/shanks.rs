//! Shanks sequence acceleration

use super::basic::Summation;
use super::summable::Summable;
use crate::error::Result;

/// Shanks transform of another summation
///
/// Once the wrapped sequence has produced three estimates
/// `A(m−1), A(m), A(m+1)`, each step yields
///
/// ```text
/// A(m+1) − (A(m+1) − A(m))² / ((A(m+1) − A(m)) − (A(m) − A(m−1)))
/// ```
///
/// When the denominator vanishes the step is flagged and the latest
/// estimate of the wrapped sequence is passed through unchanged.
pub struct ShanksTransform<S: Summation> {
    inner: S,
    window: [Option<S::Output>; 3],
    value: Option<S::Output>,
    divide_by_zero: bool,
}

impl<S: Summation> ShanksTransform<S> {
    /// Accelerate `inner`
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            window: [None, None, None],
            value: None,
            divide_by_zero: false,
        }
    }
}

impl<S: Summation> Summation for ShanksTransform<S> {
    type Output = S::Output;

    fn advance(&mut self) -> Result<()> {
        self.inner.advance()?;
        let Some(latest) = self.inner.value() else {
            return Ok(());
        };
        self.window.rotate_left(1);
        self.window[2] = Some(latest.clone());

        let [Some(a0), Some(a1), Some(a2)] = &self.window else {
            return Ok(());
        };
        match <S::Output as Summable>::shanks(a0, a1, a2)? {
            Some(accelerated) => {
                self.value = Some(accelerated);
                self.divide_by_zero = false;
            }
            None => {
                self.value = Some(a2.clone());
                self.divide_by_zero = true;
            }
        }
        Ok(())
    }

    #[inline]
    fn value(&self) -> Option<&S::Output> {
        self.value.as_ref()
    }

    #[inline]
    fn had_divide_by_zero(&self) -> bool {
        self.divide_by_zero || self.inner.had_divide_by_zero()
    }

    #[inline]
    fn inner(&self) -> Option<&dyn Summation<Output = S::Output>> {
        Some(&self.inner)
    }

    #[inline]
    fn terms(&self) -> usize {
        self.inner.terms()
    }
}
