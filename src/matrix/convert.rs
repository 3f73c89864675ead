//! Conversions between matrix domains

use super::{Matrix, MatrixBoolean, MatrixComplex, MatrixInteger, MatrixReal};
use crate::dtype::{Element, Narrowing, PromoteTo, RoundingMode};
use crate::error::Result;
use crate::storage::Storage;

impl<T: Element> Matrix<T> {
    /// Lossless conversion up the promotion lattice
    ///
    /// Pending transforms and the store representation carry over.
    pub fn promote<U: Element>(&self) -> Result<Matrix<U>>
    where
        T: PromoteTo<U>,
    {
        let data = self.storage.read().map(|v| v.promote())?;
        let scale: U = self.scale.promote();
        Ok(Matrix::from_parts(
            Storage::new(data),
            self.transposed,
            if U::LAZY_SCALE { scale } else { U::one() },
        ))
    }

    /// `x ≠ 0` for every coefficient
    pub fn to_boolean_matrix(&self) -> Result<MatrixBoolean> {
        self.map(|v| !v.is_zero())
    }

    /// Promote to the complex domain
    pub fn to_complex_matrix(&self) -> Result<MatrixComplex> {
        self.map(|v| v.to_complex())
    }
}

impl<T: Narrowing> Matrix<T> {
    /// Narrow to integers with the given rounding rule
    ///
    /// Fails if any coefficient is not finite, is out of range, or has a
    /// non-zero imaginary part.
    pub fn to_integer_matrix(&self, mode: RoundingMode) -> Result<MatrixInteger> {
        let (rows, cols) = self.shape();
        let values = self
            .to_column_major_vec()?
            .into_iter()
            .map(|v| v.to_integer_with(mode))
            .collect::<Result<Vec<_>>>()?;
        Matrix::from_values(rows, cols, values)
    }

    /// Narrow to reals; fails on a non-zero imaginary part
    pub fn to_real_matrix(&self) -> Result<MatrixReal> {
        let (rows, cols) = self.shape();
        let values = self
            .to_column_major_vec()?
            .into_iter()
            .map(Narrowing::to_real)
            .collect::<Result<Vec<_>>>()?;
        Matrix::from_values(rows, cols, values)
    }
}

impl MatrixReal {
    /// Round towards negative infinity
    pub fn floor(&self) -> Result<MatrixInteger> {
        self.to_integer_matrix(RoundingMode::Floor)
    }

    /// Round towards positive infinity
    pub fn ceil(&self) -> Result<MatrixInteger> {
        self.to_integer_matrix(RoundingMode::Ceil)
    }

    /// Round to the nearest integer
    pub fn nint(&self) -> Result<MatrixInteger> {
        self.to_integer_matrix(RoundingMode::Nearest)
    }

    /// Round towards zero
    pub fn truncate(&self) -> Result<MatrixInteger> {
        self.to_integer_matrix(RoundingMode::Truncate)
    }
}

impl MatrixComplex {
    /// Real parts
    pub fn real_part(&self) -> Result<MatrixReal> {
        self.map(|v| v.re)
    }

    /// Imaginary parts
    pub fn imag_part(&self) -> Result<MatrixReal> {
        self.map(|v| v.im)
    }
}
