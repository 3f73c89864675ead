//! Structural combinators and element-wise maps

use super::Matrix;
use crate::dtype::{Arithmetic, DType, Element};
use crate::error::{Error, Result};
use crate::storage::Storage;

impl<T: Element> Matrix<T> {
    /// Transpose; O(1), only the handle's flag changes
    pub fn transpose(&self) -> Self {
        Self::from_parts(self.storage.clone(), !self.transposed, self.scale)
    }

    /// Complex conjugate; a cheap copy of the handle outside the complex domain
    pub fn conj(&self) -> Result<Self> {
        if T::DTYPE != DType::Complex {
            return Ok(self.clone());
        }
        let data = self.storage.read().map(|v| v.conj())?;
        Ok(Self::from_parts(
            Storage::new(data),
            self.transposed,
            self.scale.conj(),
        ))
    }

    /// Conjugate transpose
    pub fn adjoint(&self) -> Result<Self> {
        Ok(self.conj()?.transpose())
    }

    /// Apply `f` to every coefficient
    pub fn map<U: Element>(&self, f: impl Fn(T) -> U + Send + Sync) -> Result<Matrix<U>> {
        let (rows, cols) = self.shape();
        let values = map_values(self.to_column_major_vec()?, f);
        Matrix::from_values(rows, cols, values)
    }

    /// Combine two equal-shape matrices coefficient by coefficient
    pub fn zip_with<U: Element, V: Element>(
        &self,
        other: &Matrix<U>,
        op: &'static str,
        f: impl Fn(T, U) -> V + Send + Sync,
    ) -> Result<Matrix<V>> {
        let (rows, cols) = self.shape();
        if (rows, cols) != other.shape() {
            return Err(Error::shape_mismatch(op, (rows, cols), other.shape()));
        }
        let lhs = self.to_column_major_vec()?;
        let rhs = other.to_column_major_vec()?;
        Matrix::from_values(rows, cols, zip_values(lhs, rhs, f))
    }

    /// `[self | other]`
    ///
    /// An empty operand yields the other operand unchanged.
    pub fn combine_left_to_right(&self, other: &Self) -> Result<Self> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        let (rows, cols) = self.shape();
        if rows != other.rows() {
            return Err(Error::shape_mismatch(
                "combine_left_to_right",
                (rows, cols),
                other.shape(),
            ));
        }
        let mut values = self.to_column_major_vec()?;
        values.extend(other.to_column_major_vec()?);
        Self::from_values(rows, cols + other.cols(), values)
    }

    /// `[self; other]`
    ///
    /// An empty operand yields the other operand unchanged.
    pub fn combine_top_to_bottom(&self, other: &Self) -> Result<Self> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        let (top_rows, cols) = self.shape();
        if cols != other.cols() {
            return Err(Error::shape_mismatch(
                "combine_top_to_bottom",
                (top_rows, cols),
                other.shape(),
            ));
        }
        let bottom_rows = other.rows();
        let top = self.to_column_major_vec()?;
        let bottom = other.to_column_major_vec()?;
        let mut values = Vec::with_capacity(top.len() + bottom.len());
        for c in 0..cols {
            values.extend_from_slice(&top[c * top_rows..(c + 1) * top_rows]);
            values.extend_from_slice(&bottom[c * bottom_rows..(c + 1) * bottom_rows]);
        }
        Self::from_values(top_rows + bottom_rows, cols, values)
    }

    /// Columns in reverse order
    pub fn column_reverse(&self) -> Result<Self> {
        let (rows, cols) = self.shape();
        Self::from_fn(rows, cols, |r, c| self.get(r - 1, cols - c))
    }

    /// Rows in reverse order
    pub fn row_reverse(&self) -> Result<Self> {
        let (rows, cols) = self.shape();
        Self::from_fn(rows, cols, |r, c| self.get(rows - r, c - 1))
    }
}

impl<T: Arithmetic> Matrix<T> {
    /// Element-wise product; boolean matrices compute an AND
    pub fn hadamard(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "hadamard", T::times)
    }

    /// Kronecker (tensor) product
    pub fn kronecker(&self, other: &Self) -> Result<Self> {
        let (ra, ca) = self.shape();
        let (rb, cb) = other.shape();
        let a = self.to_column_major_vec()?;
        let b = other.to_column_major_vec()?;
        let rows = ra * rb;
        let mut values = crate::storage::allocate(crate::storage::checked_len(rows, ca * cb)?, T::zero())?;
        for j in 0..ca {
            for l in 0..cb {
                let col = j * cb + l;
                for i in 0..ra {
                    let aij = a[j * ra + i];
                    for k in 0..rb {
                        values[col * rows + i * rb + k] = aij.times(b[l * rb + k]);
                    }
                }
            }
        }
        Self::from_values(rows, ca * cb, values)
    }
}

pub(crate) fn map_values<T: Element, U: Element>(
    values: Vec<T>,
    f: impl Fn(T) -> U + Send + Sync,
) -> Vec<U> {
    #[cfg(feature = "rayon")]
    if values.len() >= super::PARALLEL_THRESHOLD {
        use rayon::prelude::*;
        return values.into_par_iter().map(f).collect();
    }
    values.into_iter().map(f).collect()
}

pub(crate) fn zip_values<T: Element, U: Element, V: Element>(
    lhs: Vec<T>,
    rhs: Vec<U>,
    f: impl Fn(T, U) -> V + Send + Sync,
) -> Vec<V> {
    #[cfg(feature = "rayon")]
    if lhs.len() >= super::PARALLEL_THRESHOLD {
        use rayon::prelude::*;
        return lhs
            .into_par_iter()
            .zip(rhs.into_par_iter())
            .map(|(a, b)| f(a, b))
            .collect();
    }
    lhs.into_iter().zip(rhs).map(|(a, b)| f(a, b)).collect()
}

#[cfg(test)]
mod tests {
    use crate::dtype::Complex;
    use crate::matrix::{MatrixBoolean, MatrixComplex, MatrixInteger, MatrixReal};

    #[test]
    fn test_transpose_is_lazy() {
        let a = MatrixReal::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = a.transpose();
        assert!(b.shares_storage_with(&a));
        assert_eq!(b.at(1, 2).unwrap(), 3.0);
        assert_eq!(b.transpose(), a);
    }

    #[test]
    fn test_conj_and_adjoint() {
        let a = MatrixComplex::from_rows(&[[Complex::new(1.0, 2.0), Complex::new(3.0, -1.0)]])
            .unwrap();
        let h = a.adjoint().unwrap();
        assert_eq!(h.shape(), (2, 1));
        assert_eq!(h.at(2, 1).unwrap(), Complex::new(3.0, 1.0));
        assert_eq!(a.conj().unwrap().conj().unwrap(), a);
    }

    #[test]
    fn test_combine() {
        let a = MatrixReal::from_rows(&[[1.0, 2.0]]).unwrap();
        let b = MatrixReal::from_rows(&[[3.0, 4.0]]).unwrap();
        let lr = a.combine_left_to_right(&b).unwrap();
        assert_eq!(lr, MatrixReal::from_rows(&[[1.0, 2.0, 3.0, 4.0]]).unwrap());
        let tb = a.combine_top_to_bottom(&b).unwrap();
        assert_eq!(tb, MatrixReal::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap());
        assert_eq!(MatrixReal::empty().combine_left_to_right(&a).unwrap(), a);
        assert!(a.combine_top_to_bottom(&lr).is_err());
    }

    #[test]
    fn test_reverse() {
        let a = MatrixInteger::from_rows(&[[1, 2], [3, 4]]).unwrap();
        assert_eq!(
            a.column_reverse().unwrap(),
            MatrixInteger::from_rows(&[[2, 1], [4, 3]]).unwrap()
        );
        assert_eq!(
            a.row_reverse().unwrap(),
            MatrixInteger::from_rows(&[[3, 4], [1, 2]]).unwrap()
        );
    }

    #[test]
    fn test_boolean_hadamard() {
        let a = MatrixBoolean::from_rows(&[[true, false], [false, true]]).unwrap();
        let b = MatrixBoolean::from_rows(&[[true, true], [false, true]]).unwrap();
        assert_eq!(a.hadamard(&b).unwrap(), a);
    }

    #[test]
    fn test_kronecker() {
        let a = MatrixInteger::from_rows(&[[1, 2]]).unwrap();
        let b = MatrixInteger::from_rows(&[[1], [10]]).unwrap();
        let k = a.kronecker(&b).unwrap();
        assert_eq!(k, MatrixInteger::from_rows(&[[1, 2], [10, 20]]).unwrap());
    }

    #[test]
    fn test_kronecker_is_bilinear() {
        let a = MatrixInteger::from_rows(&[[1, -2], [3, 4]]).unwrap();
        let b = MatrixInteger::from_rows(&[[0, 5], [-1, 2]]).unwrap();
        let c = MatrixInteger::from_rows(&[[2, 1, -3]]).unwrap();
        let alpha = 3;

        let lhs = a.scale(alpha).unwrap().add(&b).unwrap().kronecker(&c).unwrap();
        let rhs = a
            .kronecker(&c)
            .unwrap()
            .scale(alpha)
            .unwrap()
            .add(&b.kronecker(&c).unwrap())
            .unwrap();
        assert_eq!(lhs.shape(), (2, 6));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_hadamard_commutes_and_associates() {
        let a = MatrixComplex::from_rows(&[
            [Complex::new(1.0, 2.0), Complex::new(0.0, -1.0)],
            [Complex::new(3.0, 0.0), Complex::new(-2.0, 0.5)],
        ])
        .unwrap();
        let b = a.conj().unwrap().transpose();
        let c = MatrixComplex::from_rows(&[
            [Complex::new(0.5, 0.0), Complex::new(2.0, 2.0)],
            [Complex::new(-1.0, 1.0), Complex::new(4.0, 0.0)],
        ])
        .unwrap();

        assert_eq!(a.hadamard(&b).unwrap(), b.hadamard(&a).unwrap());
        let left = a.hadamard(&b).unwrap().hadamard(&c).unwrap();
        let right = a.hadamard(&b.hadamard(&c).unwrap()).unwrap();
        assert_eq!(left, right);

        let p = MatrixBoolean::from_rows(&[[true, false], [true, true]]).unwrap();
        let q = MatrixBoolean::from_rows(&[[true, true], [false, true]]).unwrap();
        assert_eq!(p.hadamard(&q).unwrap(), q.hadamard(&p).unwrap());
    }
}
