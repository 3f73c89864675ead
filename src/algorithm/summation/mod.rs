//! Series summation with stacked Shanks acceleration
//!
//! Computes `Σ_{m=start}^{end} f(m)` where either end may be infinite and
//! `f` yields any of the eight scalar or matrix domains.
//!
//! # Infinite tails
//!
//! ```text
//! s3(s2(s1(base)))      base = running partial sums
//!   │                   sk   = Shanks transform of s(k−1)
//!   ├── start from s3; demote to the next lower level on a zero denominator
//!   ├── error = relative change between successive estimates
//!   ├── converged: error ≤ convergence_limit on `converged_run` steps in a row
//!   └── failed:    error above its running average on more than
//!                  `diverged_run` steps in a row, or `max_terms` reached
//! ```
//!
//! Two-sided and half-open ranges are split into a finite part and one or
//! two one-sided tails.

mod basic;
mod shanks;
mod summable;
mod types;

pub use basic::{BasicSummation, Summation};
pub use shanks::ShanksTransform;
pub use summable::Summable;
pub use types::{SumBound, Summand, SummationOptions, TryTerms};

use crate::error::{Error, Result};
use tracing::{debug, warn};

/// Number of stacked Shanks transforms above the partial sums
const TRANSFORMS: usize = 3;

/// `Σ_{m=start}^{end} f(m)` with default options
///
/// ```
/// use numval::algorithm::summation::{sum, SumBound};
///
/// let finite = sum(&|m: i64| m, 1, 5).unwrap();
/// assert_eq!(finite, 15);
///
/// let geometric = sum(&|m: i64| 0.5f64.powi(m as i32), 0, SumBound::PosInfinity).unwrap();
/// assert!((geometric - 2.0).abs() < 1e-12);
/// ```
pub fn sum<F: Summand + ?Sized>(
    f: &F,
    start: impl Into<SumBound>,
    end: impl Into<SumBound>,
) -> Result<F::Output> {
    sum_with(f, start, end, &SummationOptions::default())
}

/// `Σ_{m=start}^{end} f(m)`
///
/// A finite range is summed directly in either direction. `+∞` as the
/// start or `−∞` as the end is rejected. A tail that does not settle
/// raises [`Error::CanNotConverge`].
pub fn sum_with<F: Summand + ?Sized>(
    f: &F,
    start: impl Into<SumBound>,
    end: impl Into<SumBound>,
    options: &SummationOptions,
) -> Result<F::Output> {
    use SumBound::{Finite, NegInfinity, PosInfinity};

    match (start.into(), end.into()) {
        (PosInfinity, _) => Err(Error::invalid_parameter(
            "start",
            "a summation cannot start at +infinity",
        )),
        (_, NegInfinity) => Err(Error::invalid_parameter(
            "end",
            "a summation cannot end at -infinity",
        )),
        (Finite(s), Finite(e)) => finite(f, s, e),
        (NegInfinity, PosInfinity) => {
            tail(f, -1, -1, options)?.accumulate(&tail(f, 0, 1, options)?)
        }
        (NegInfinity, Finite(e)) if e < 0 => tail(f, e, -1, options),
        (NegInfinity, Finite(e)) => tail(f, -1, -1, options)?.accumulate(&finite(f, 0, e)?),
        (Finite(s), PosInfinity) if s < 0 => {
            finite(f, s, -1)?.accumulate(&tail(f, 0, 1, options)?)
        }
        (Finite(s), PosInfinity) => tail(f, s, 1, options),
    }
}

/// Like [`sum`], but a series that does not converge yields the domain's
/// NaN equivalent instead of an error
///
/// That is NaN for real, NaN + NaN·i for complex, `0` / `false` for the
/// integral domains and an empty matrix for every matrix domain. Other
/// errors still propagate.
pub fn sum_or_nan<F: Summand + ?Sized>(
    f: &F,
    start: impl Into<SumBound>,
    end: impl Into<SumBound>,
) -> Result<F::Output> {
    match sum(f, start, end) {
        Err(Error::CanNotConverge { terms }) => {
            warn!(terms, "series did not converge, returning NaN equivalent");
            Ok(<F::Output as Summable>::nan_equivalent())
        }
        other => other,
    }
}

/// Direct partial sum over `min(a, b) ..= max(a, b)`
fn finite<F: Summand + ?Sized>(f: &F, a: i64, b: i64) -> Result<F::Output> {
    let (lo, hi) = (a.min(b), a.max(b));
    let mut partial = BasicSummation::new(f, lo, 1);
    for _ in 0..=hi.abs_diff(lo) {
        partial.advance()?;
    }
    partial
        .value()
        .cloned()
        .ok_or_else(|| Error::invalid_parameter("range", "empty summation range"))
}

/// The summation `levels` steps inside `top`
fn level<'a, R: Summable>(
    top: &'a dyn Summation<Output = R>,
    levels: usize,
) -> Option<&'a dyn Summation<Output = R>> {
    let mut current = top;
    for _ in 0..levels {
        current = current.inner()?;
    }
    Some(current)
}

/// One-sided infinite tail `f(first) + f(first + sign) + …`
fn tail<F: Summand + ?Sized>(
    f: &F,
    first: i64,
    sign: i64,
    options: &SummationOptions,
) -> Result<F::Output> {
    let mut engine = ShanksTransform::new(ShanksTransform::new(ShanksTransform::new(
        BasicSummation::new(f, first, sign),
    )));
    let cap = |terms: usize| {
        warn!(first, sign, terms, "series reached the term limit");
        Error::CanNotConverge { terms }
    };

    // s2 supplies the first estimate
    let mut last = loop {
        if let Some(v) = level::<F::Output>(&engine, 1).and_then(|s| s.value()) {
            break v.clone();
        }
        if engine.terms() >= options.max_terms {
            return Err(cap(engine.terms()));
        }
        engine.advance()?;
    };

    let mut progress = Progress::new(TRANSFORMS);

    loop {
        if engine.terms() >= options.max_terms {
            return Err(cap(engine.terms()));
        }
        engine.advance()?;

        if progress.level > 0
            && level::<F::Output>(&engine, TRANSFORMS - progress.level)
                .is_some_and(|s| s.had_divide_by_zero())
        {
            progress.demote();
            debug!(
                level = progress.level,
                terms = engine.terms(),
                "zero denominator, demoting"
            );
        }

        let Some(current) = level::<F::Output>(&engine, TRANSFORMS - progress.level)
            .and_then(|s| s.value())
            .cloned()
        else {
            continue;
        };

        let error = <F::Output as Summable>::error_value(&last, &current)?;
        progress.record(error, options);
        last = current;

        if progress.converged_run >= options.converged_run {
            debug!(
                level = progress.level,
                terms = engine.terms(),
                error,
                "series converged"
            );
            return Ok(last);
        }
        if progress.diverged_run > options.diverged_run {
            warn!(first, sign, terms = engine.terms(), error, "series diverged");
            return Err(Error::CanNotConverge {
                terms: engine.terms(),
            });
        }
    }
}

/// Convergence bookkeeping of a tail at its current acceleration level
#[derive(Debug, Clone, PartialEq)]
struct Progress {
    level: usize,
    converged_run: usize,
    diverged_run: usize,
    error_total: f64,
    error_count: usize,
}

impl Progress {
    fn new(level: usize) -> Self {
        Self {
            level,
            converged_run: 0,
            diverged_run: 0,
            error_total: 0.0,
            error_count: 0,
        }
    }

    /// Drop one acceleration level and forget the history of the old one
    fn demote(&mut self) {
        *self = Self::new(self.level.saturating_sub(1));
    }

    fn record(&mut self, error: f64, options: &SummationOptions) {
        if error <= options.convergence_limit {
            self.converged_run += 1;
        } else {
            self.converged_run = 0;
        }
        if self.error_count > 0 && error > self.error_total / self.error_count as f64 {
            self.diverged_run += 1;
        } else {
            self.diverged_run = 0;
        }
        self.error_total += error;
        self.error_count += 1;
    }
}
