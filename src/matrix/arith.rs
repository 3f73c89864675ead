//! Matrix arithmetic
//!
//! Arithmetic is exposed as fallible methods rather than operator overloads
//! because shape mismatches and allocation failures are reported as errors.
//! Boolean matrices follow integer promotion (see [`Arithmetic`]).

use super::Matrix;
use crate::dtype::{Arithmetic, Complex, Element, Numeric};
use crate::error::{Error, Result};
use crate::runtime::cpu::linalg::matmul_kernel;
use std::ops::Neg;

impl<T: Arithmetic> Matrix<T> {
    /// `self + other`
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "add", T::plus)
    }

    /// `self − other`
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "sub", T::minus)
    }

    /// Matrix product `self · other`
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        let (m, k) = self.shape();
        let (k2, n) = other.shape();
        if k != k2 {
            return Err(Error::shape_mismatch("matmul", (m, k), (k2, n)));
        }
        let a = self.to_column_major_vec()?;
        let b = other.to_column_major_vec()?;
        let mut c = crate::storage::allocate(crate::storage::checked_len(m, n)?, T::zero())?;
        matmul_kernel(m, n, k, &a, &b, &mut c);
        Self::from_values(m, n, c)
    }

    /// `−self`
    ///
    /// Real and complex matrices fold the sign into the pending scale.
    pub fn negate(&self) -> Result<Self> {
        if T::LAZY_SCALE {
            return Ok(self.scale_lazy(T::one().negate()));
        }
        self.map(T::negate)
    }

    /// Sum of the diagonal coefficients
    pub fn trace(&self) -> T {
        self.diagonal_entries()
            .into_iter()
            .fold(T::zero(), |acc, v| acc.plus(v))
    }
}

impl<T: Element> Matrix<T> {
    /// Multiply by a scalar
    ///
    /// Real and complex matrices record the factor on the handle, fused
    /// with any factor already pending; the store is shared, not copied.
    /// Integer and boolean matrices are scaled eagerly.
    pub fn scale(&self, factor: T) -> Result<Self> {
        if T::LAZY_SCALE {
            return Ok(self.scale_lazy(factor));
        }
        self.map(|v| v.scale_by(factor))
    }

    /// Fuse `factor` into the pending scale (real and complex domains)
    pub(crate) fn scale_lazy(&self, factor: T) -> Self {
        Self::from_parts(
            self.storage.clone(),
            self.transposed,
            self.scale.scale_by(factor),
        )
    }
}

impl<T: Numeric> Matrix<T> {
    /// Divide every coefficient by a scalar
    ///
    /// Integer division truncates towards zero; dividing an integer matrix by
    /// zero is an error.
    pub fn div_scalar(&self, divisor: T) -> Result<Self> {
        let (rows, cols) = self.shape();
        let values = self
            .to_column_major_vec()?
            .into_iter()
            .map(|v| {
                v.checked_div(divisor)
                    .ok_or_else(|| Error::invalid_parameter("divisor", "integer division by zero"))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_values(rows, cols, values)
    }
}

macro_rules! impl_lazy_neg {
    ($($t:ty),*) => {
        $(
            impl Neg for Matrix<$t> {
                type Output = Matrix<$t>;

                fn neg(self) -> Self::Output {
                    self.scale_lazy(-<$t as Element>::one())
                }
            }

            impl Neg for &Matrix<$t> {
                type Output = Matrix<$t>;

                fn neg(self) -> Self::Output {
                    self.scale_lazy(-<$t as Element>::one())
                }
            }
        )*
    };
}

impl_lazy_neg!(f64, Complex);

#[cfg(test)]
mod tests {
    use crate::matrix::{MatrixBoolean, MatrixInteger, MatrixReal};

    #[test]
    fn test_add_sub() {
        let a = MatrixReal::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = MatrixReal::from_rows(&[[4.0, 3.0], [2.0, 1.0]]).unwrap();
        let s = a.add(&b).unwrap();
        assert_eq!(s, MatrixReal::filled(2, 2, 5.0).unwrap());
        assert_eq!(s.sub(&b).unwrap(), a);
        assert!(a.add(&MatrixReal::new(1, 2).unwrap()).is_err());
    }

    #[test]
    fn test_lazy_scale_fuses() {
        let a = MatrixReal::from_rows(&[[1.0, 2.0]]).unwrap();
        let b = a.scale(2.0).unwrap().scale(3.0).unwrap();
        assert!(b.shares_storage_with(&a));
        assert_eq!(b.pending_scale(), 6.0);
        assert_eq!(b.at(1, 2).unwrap(), 12.0);
        assert_eq!((-&b).at(1, 1).unwrap(), -6.0);
    }

    #[test]
    fn test_integer_scale_is_eager() {
        let a = MatrixInteger::from_rows(&[[1, 2]]).unwrap();
        let b = a.scale(3).unwrap();
        assert!(!b.shares_storage_with(&a));
        assert_eq!(b.pending_scale(), 1);
        assert_eq!(b.to_row_major_vec().unwrap(), vec![3, 6]);
    }

    #[test]
    fn test_matmul() {
        let a = MatrixInteger::from_rows(&[[1, 2], [3, 4]]).unwrap();
        let b = MatrixInteger::from_rows(&[[5], [6]]).unwrap();
        assert_eq!(
            a.matmul(&b).unwrap(),
            MatrixInteger::from_rows(&[[17], [39]]).unwrap()
        );
        assert_eq!(a.matmul(&MatrixInteger::identity(2).unwrap()).unwrap(), a);
        assert!(b.matmul(&b).is_err());
    }

    #[test]
    fn test_matmul_respects_pending_transpose() {
        let a = MatrixReal::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        let g = a.matmul(&a.transpose()).unwrap();
        assert_eq!(g.at(1, 1).unwrap(), 14.0);
    }

    #[test]
    fn test_boolean_arithmetic() {
        let a = MatrixBoolean::from_rows(&[[true, false], [true, true]]).unwrap();
        let b = MatrixBoolean::from_rows(&[[true, true], [false, true]]).unwrap();
        assert_eq!(
            a.add(&b).unwrap(),
            MatrixBoolean::from_rows(&[[true, true], [true, true]]).unwrap()
        );
        assert_eq!(
            a.sub(&b).unwrap(),
            MatrixBoolean::from_rows(&[[false, true], [true, false]]).unwrap()
        );
        assert_eq!(
            a.matmul(&b).unwrap(),
            MatrixBoolean::from_rows(&[[true, true], [true, true]]).unwrap()
        );
    }

    #[test]
    fn test_integer_division() {
        let a = MatrixInteger::from_rows(&[[7, -7]]).unwrap();
        assert_eq!(a.div_scalar(2).unwrap().to_row_major_vec().unwrap(), vec![3, -3]);
        assert!(a.div_scalar(0).is_err());
    }
}
