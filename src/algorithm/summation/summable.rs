//! Values that can be summed and accelerated

use crate::dtype::{Arithmetic, Complex, Element, Numeric};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use std::fmt;

/// A domain in which partial sums accumulate
///
/// Implemented for the four scalar domains and the four matrix domains.
pub trait Summable: Clone + fmt::Debug {
    /// `self + term`
    fn accumulate(&self, term: &Self) -> Result<Self>;

    /// Relative change between two successive estimates
    fn error_value(last: &Self, current: &Self) -> Result<f64>;

    /// One Shanks step over three consecutive partial sums
    ///
    /// Returns `None` when the denominator `(a2 − a1) − (a1 − a0)` is zero.
    /// Matrices transform coefficient by coefficient: a coefficient with a
    /// zero denominator keeps its `a2` value, and `None` is returned only
    /// when no coefficient could be transformed.
    fn shanks(a0: &Self, a1: &Self, a2: &Self) -> Result<Option<Self>>;

    /// What a failed summation yields in this domain
    fn nan_equivalent() -> Self;
}

fn shanks_step<T: Numeric + Arithmetic>(a0: T, a1: T, a2: T) -> Option<T> {
    let d1 = a2.minus(a1);
    let den = d1.minus(a1.minus(a0));
    if den.is_zero() {
        return None;
    }
    d1.times(d1).checked_div(den).map(|q| a2.minus(q))
}

// Booleans have no division, so there is nothing to accelerate.
fn shanks_never(_: bool, _: bool, _: bool) -> Option<bool> {
    None
}

fn relative_change(last: Complex, current: Complex) -> f64 {
    if last == current {
        return 0.0;
    }
    let delta = (last - current).magnitude();
    let scale = current.magnitude();
    if scale == 0.0 { delta } else { delta / scale }
}

macro_rules! impl_summable_scalar {
    ($($t:ty => $step:path),* $(,)?) => {
        $(
            impl Summable for $t {
                #[inline]
                fn accumulate(&self, term: &Self) -> Result<Self> {
                    Ok(self.plus(*term))
                }

                fn error_value(last: &Self, current: &Self) -> Result<f64> {
                    if <$t as Element>::DTYPE == crate::dtype::DType::Boolean {
                        return Ok(if last == current { 0.0 } else { 1.0 });
                    }
                    Ok(relative_change(last.to_complex(), current.to_complex()))
                }

                #[inline]
                fn shanks(a0: &Self, a1: &Self, a2: &Self) -> Result<Option<Self>> {
                    Ok($step(*a0, *a1, *a2))
                }

                #[inline]
                fn nan_equivalent() -> Self {
                    <$t as Element>::nan()
                }
            }
        )*
    };
}

impl_summable_scalar!(
    bool => shanks_never,
    i64 => shanks_step,
    f64 => shanks_step,
    Complex => shanks_step,
);

fn shanks_matrix<T: Element>(
    a0: &Matrix<T>,
    a1: &Matrix<T>,
    a2: &Matrix<T>,
    step: fn(T, T, T) -> Option<T>,
) -> Result<Option<Matrix<T>>> {
    for other in [a0, a1] {
        if other.shape() != a2.shape() {
            return Err(Error::shape_mismatch("shanks", other.shape(), a2.shape()));
        }
    }
    let (rows, cols) = a2.shape();
    let x0 = a0.to_column_major_vec()?;
    let x1 = a1.to_column_major_vec()?;
    let x2 = a2.to_column_major_vec()?;
    let mut transformed = false;
    let out: Vec<T> = x0
        .iter()
        .zip(&x1)
        .zip(&x2)
        .map(|((&p, &q), &r)| match step(p, q, r) {
            Some(v) => {
                transformed = true;
                v
            }
            None => r,
        })
        .collect();
    if !transformed {
        return Ok(None);
    }
    Matrix::from_column_major_vec(rows, cols, out).map(Some)
}

macro_rules! impl_summable_matrix {
    ($($t:ty => $step:path),* $(,)?) => {
        $(
            impl Summable for Matrix<$t> {
                fn accumulate(&self, term: &Self) -> Result<Self> {
                    self.add(term)
                }

                fn error_value(last: &Self, current: &Self) -> Result<f64> {
                    if <$t as Element>::DTYPE == crate::dtype::DType::Boolean {
                        return Ok(if last == current { 0.0 } else { 1.0 });
                    }
                    let delta = last.sub(current)?.euclidean_norm()?;
                    let scale = current.euclidean_norm()?;
                    Ok(if scale == 0.0 { delta } else { delta / scale })
                }

                fn shanks(a0: &Self, a1: &Self, a2: &Self) -> Result<Option<Self>> {
                    shanks_matrix(a0, a1, a2, $step)
                }

                #[inline]
                fn nan_equivalent() -> Self {
                    Matrix::empty()
                }
            }
        )*
    };
}

impl_summable_matrix!(
    bool => shanks_never,
    i64 => shanks_step,
    f64 => shanks_step,
    Complex => shanks_step,
);
