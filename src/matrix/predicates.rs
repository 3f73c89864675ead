//! Structural predicates with relative tolerance

use super::{Matrix, MatrixComplex};
use crate::dtype::{Complex, Element};
use crate::error::Result;

/// `|a − b| / mean(|a|, |b|) ≤ tol`; exact equality always passes
pub fn approx_equal(a: Complex, b: Complex, tol: f64) -> bool {
    if a == b {
        return true;
    }
    let mean = 0.5 * (a.magnitude() + b.magnitude());
    (a - b).magnitude() / mean <= tol
}

impl<T: Element> Matrix<T> {
    /// True if `rows == cols`
    pub fn is_square(&self) -> bool {
        let (rows, cols) = self.shape();
        rows == cols
    }

    /// `a(i, j) == a(j, i)` within `tol`
    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.mirror_matches(tol, |v| v)
    }

    /// `a(i, j) == conj(a(j, i))` within `tol`
    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.mirror_matches(tol, Complex::conj)
    }

    /// `a(i, j) == −a(j, i)` within `tol`
    pub fn is_skew_symmetric(&self, tol: f64) -> bool {
        self.mirror_matches(tol, |v| -v)
    }

    /// `a(i, j) == −conj(a(j, i))` within `tol`
    pub fn is_skew_hermitian(&self, tol: f64) -> bool {
        self.mirror_matches(tol, |v| -v.conj())
    }

    /// `A·Aᴴ == Aᴴ·A` within `tol`
    pub fn is_normal(&self, tol: f64) -> Result<bool> {
        if !self.is_square() {
            return Ok(false);
        }
        let a: MatrixComplex = self.to_complex_matrix()?;
        let h = a.adjoint()?;
        let lhs = a.matmul(&h)?.to_column_major_vec()?;
        let rhs = h.matmul(&a)?.to_column_major_vec()?;
        Ok(lhs.iter().zip(&rhs).all(|(&x, &y)| approx_equal(x, y, tol)))
    }

    fn mirror_matches(&self, tol: f64, mirror: impl Fn(Complex) -> Complex) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.rows();
        let data = self.storage.read();
        for i in 0..n {
            for j in i..n {
                let a = self.get_from(&data, i, j).to_complex();
                let b = mirror(self.get_from(&data, j, i).to_complex());
                if !approx_equal(a, b, tol) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{MatrixInteger, MatrixReal};

    #[test]
    fn test_approx_equal() {
        assert!(approx_equal(Complex::ZERO, Complex::ZERO, 0.0));
        assert!(approx_equal(Complex::new(1.0, 0.0), Complex::new(1.001, 0.0), 1e-2));
        assert!(!approx_equal(Complex::new(1.0, 0.0), Complex::new(1.1, 0.0), 1e-2));
        assert!(!approx_equal(Complex::ZERO, Complex::new(1e-12, 0.0), 1e-3));
    }

    #[test]
    fn test_symmetry_predicates() {
        let s = MatrixReal::from_rows(&[[1.0, 2.0], [2.0, 3.0]]).unwrap();
        assert!(s.is_symmetric(0.0));
        assert!(s.is_hermitian(0.0));
        assert!(!s.is_skew_symmetric(0.0));

        let k = MatrixInteger::from_rows(&[[0, 2], [-2, 0]]).unwrap();
        assert!(k.is_skew_symmetric(0.0));
        assert!(!k.is_symmetric(0.0));
        assert!(!MatrixReal::new(2, 3).unwrap().is_symmetric(1.0));
    }

    #[test]
    fn test_hermitian() {
        let h = MatrixComplex::from_rows(&[
            [Complex::new(2.0, 0.0), Complex::new(1.0, 1.0)],
            [Complex::new(1.0, -1.0), Complex::new(3.0, 0.0)],
        ])
        .unwrap();
        assert!(h.is_hermitian(1e-12));
        assert!(!h.is_symmetric(1e-12));
        assert!(h.scale(Complex::I).unwrap().is_skew_hermitian(1e-12));
    }

    #[test]
    fn test_normal() {
        let s = MatrixReal::from_rows(&[[1.0, 2.0], [2.0, 3.0]]).unwrap();
        assert!(s.is_normal(1e-12).unwrap());
        let n = MatrixReal::from_rows(&[[1.0, 1.0], [0.0, 1.0]]).unwrap();
        assert!(!n.is_normal(1e-12).unwrap());
    }
}
