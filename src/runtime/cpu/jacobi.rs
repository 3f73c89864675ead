//! Jacobi rotation utilities for the one-sided Jacobi SVD
//!
//! The rotation parameters use the numerically stable LAPACK formula to
//! avoid catastrophic cancellation. Complex column pairs are first aligned
//! with a unit phase so that the remaining 2x2 problem is real.
//!
//! All buffers are column-major: element `(i, j)` of an `rows x cols`
//! matrix lives at `data[j * rows + i]`.

use crate::dtype::{Arithmetic, Complex, Numeric};
use std::ops::Div;

/// Trait for elements that support linear algebra operations
///
/// Implemented for the real and complex domains. Integer and boolean
/// matrices are promoted to real before reaching the kernels.
pub trait LinalgElement: Numeric + Arithmetic + Div<Output = Self> {
    /// Returns machine epsilon for this type
    #[inline]
    fn epsilon_val() -> f64 {
        f64::EPSILON
    }
    /// Returns absolute value
    fn abs_val(self) -> f64;
    /// Returns squared absolute value
    fn abs2(self) -> f64;
    /// Embeds a real number
    fn from_real(value: f64) -> Self;
    /// Returns the real part
    fn real(self) -> f64;
    /// Returns the principal square root
    fn sqrt_val(self) -> Self;
    /// Returns `x / |x|`, or one for zero
    fn unit_phase(self) -> Self;
    /// Converts a complex number, failing on a non-zero imaginary part
    fn from_complex(value: Complex) -> Option<Self>;
}

impl LinalgElement for f64 {
    #[inline]
    fn abs_val(self) -> f64 {
        self.abs()
    }
    #[inline]
    fn abs2(self) -> f64 {
        self * self
    }
    #[inline]
    fn from_real(value: f64) -> Self {
        value
    }
    #[inline]
    fn real(self) -> f64 {
        self
    }
    #[inline]
    fn sqrt_val(self) -> Self {
        self.sqrt()
    }
    #[inline]
    fn unit_phase(self) -> Self {
        if self < 0.0 { -1.0 } else { 1.0 }
    }
    #[inline]
    fn from_complex(value: Complex) -> Option<Self> {
        value.is_real().then_some(value.re)
    }
}

impl LinalgElement for Complex {
    #[inline]
    fn abs_val(self) -> f64 {
        self.magnitude()
    }
    #[inline]
    fn abs2(self) -> f64 {
        self.magnitude_squared()
    }
    #[inline]
    fn from_real(value: f64) -> Self {
        Complex::new(value, 0.0)
    }
    #[inline]
    fn real(self) -> f64 {
        self.re
    }
    #[inline]
    fn sqrt_val(self) -> Self {
        self.sqrt()
    }
    #[inline]
    fn unit_phase(self) -> Self {
        let m = self.magnitude();
        if m == 0.0 { Complex::ONE } else { self.scale(1.0 / m) }
    }
    #[inline]
    fn from_complex(value: Complex) -> Option<Self> {
        Some(value)
    }
}

/// Jacobi rotation parameters (cosine and sine of rotation angle)
///
/// These parameters define a Givens rotation matrix:
/// ```text
/// J = [ c  -s ]
///     [ s   c ]
/// ```
#[derive(Debug, Clone, Copy)]
pub struct JacobiRotation {
    /// Cosine of rotation angle
    pub c: f64,
    /// Sine of rotation angle
    pub s: f64,
}

impl JacobiRotation {
    /// Compute Jacobi rotation parameters using numerically stable LAPACK formula
    ///
    /// Given the 2x2 Hermitian Gram block `[[a_pp, a_pq], [a_pq, a_qq]]`
    /// with real `a_pq`, computes the rotation that zeroes the off-diagonal
    /// element.
    ///
    /// # Algorithm
    /// ```text
    /// τ = (a_qq - a_pp) / (2 * a_pq)
    /// t = sign(τ) / (|τ| + sqrt(1 + τ²))
    /// c = 1 / sqrt(1 + t²)
    /// s = t * c
    /// ```
    #[inline]
    pub fn compute(a_pp: f64, a_qq: f64, a_pq: f64) -> Self {
        let tau_den = 2.0 * a_pq;
        if tau_den.abs() < 1e-300 {
            return Self { c: 1.0, s: 0.0 };
        }

        let tau = (a_qq - a_pp) / tau_den;
        let t = if tau >= 0.0 {
            1.0 / (tau + (1.0 + tau * tau).sqrt())
        } else {
            -1.0 / (-tau + (1.0 + tau * tau).sqrt())
        };

        let c = 1.0 / (1.0 + t * t).sqrt();
        Self { c, s: t * c }
    }
}

/// Gram elements of two columns: `(‖b_p‖², ‖b_q‖², b_pᴴ b_q)`
#[inline]
pub fn compute_gram_elements<T: LinalgElement>(
    b: &[T],
    rows: usize,
    p: usize,
    q: usize,
) -> (f64, f64, T) {
    let col_p = &b[p * rows..(p + 1) * rows];
    let col_q = &b[q * rows..(q + 1) * rows];
    let mut a_pp = 0.0;
    let mut a_qq = 0.0;
    let mut a_pq = T::zero();
    for (&bp, &bq) in col_p.iter().zip(col_q) {
        a_pp += bp.abs2();
        a_qq += bq.abs2();
        a_pq = a_pq + bp.conj() * bq;
    }
    (a_pp, a_qq, a_pq)
}

/// Multiply column `q` by `phase`
#[inline]
pub fn apply_phase_to_column<T: LinalgElement>(data: &mut [T], rows: usize, q: usize, phase: T) {
    for v in &mut data[q * rows..(q + 1) * rows] {
        *v = *v * phase;
    }
}

/// Apply a Jacobi rotation to two columns
///
/// Computes `[col_p', col_q'] = [c·col_p − s·col_q, s·col_p + c·col_q]`.
#[inline]
pub fn apply_rotation_to_columns<T: LinalgElement>(
    data: &mut [T],
    rows: usize,
    p: usize,
    q: usize,
    rot: &JacobiRotation,
) {
    let c = T::from_real(rot.c);
    let s = T::from_real(rot.s);
    for i in 0..rows {
        let val_p = data[p * rows + i];
        let val_q = data[q * rows + i];
        data[p * rows + i] = c * val_p - s * val_q;
        data[q * rows + i] = s * val_p + c * val_q;
    }
}

/// Indices that sort `values` in descending order
#[inline]
pub fn argsort_desc(values: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&i, &j| values[j].total_cmp(&values[i]));
    indices
}

/// Reorder matrix columns according to an index permutation
#[inline]
pub fn permute_columns<T: LinalgElement>(data: &[T], rows: usize, indices: &[usize]) -> Vec<T> {
    let mut result = Vec::with_capacity(rows * indices.len());
    for &old in indices {
        result.extend_from_slice(&data[old * rows..(old + 1) * rows]);
    }
    result
}

/// Column-major `n x n` identity
#[inline]
pub fn identity_matrix<T: LinalgElement>(n: usize) -> Vec<T> {
    let mut result = vec![T::zero(); n * n];
    for i in 0..n {
        result[i * n + i] = T::one();
    }
    result
}

/// Normalise every column in place; returns the column norms
///
/// Columns with norm at or below `eps` are zeroed.
#[inline]
pub fn normalize_columns<T: LinalgElement>(data: &mut [T], rows: usize, cols: usize, eps: f64) -> Vec<f64> {
    let mut norms = vec![0.0; cols];
    for (j, norm_out) in norms.iter_mut().enumerate() {
        let column = &mut data[j * rows..(j + 1) * rows];
        let norm = column.iter().map(|v| v.abs2()).sum::<f64>().sqrt();
        *norm_out = norm;
        if norm > eps {
            let inv = T::from_real(1.0 / norm);
            for v in column.iter_mut() {
                *v = *v * inv;
            }
        } else {
            column.fill(T::zero());
        }
    }
    norms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jacobi_rotation_zero_offdiag() {
        let rot = JacobiRotation::compute(1.0, 2.0, 0.0);
        assert!((rot.c - 1.0).abs() < 1e-10);
        assert!(rot.s.abs() < 1e-10);
    }

    #[test]
    fn test_jacobi_rotation_equal_diag() {
        let rot = JacobiRotation::compute(1.0, 1.0, 0.5);
        let expected = 1.0 / 2.0f64.sqrt();
        assert!((rot.c - expected).abs() < 1e-10);
        assert!((rot.s.abs() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_rotation_orthogonalises_columns() {
        // columns [1, 1] and [1, 0]
        let mut b = vec![1.0, 1.0, 1.0, 0.0];
        let (a_pp, a_qq, a_pq) = compute_gram_elements(&b, 2, 0, 1);
        let rot = JacobiRotation::compute(a_pp, a_qq, a_pq);
        apply_rotation_to_columns(&mut b, 2, 0, 1, &rot);
        let (_, _, g) = compute_gram_elements(&b, 2, 0, 1);
        assert!(g.abs() < 1e-12);
    }

    #[test]
    fn test_complex_phase_alignment() {
        let g = Complex::new(0.0, 2.0);
        let u = g.unit_phase();
        assert!((u - Complex::I).magnitude() < 1e-15);
        assert_eq!(Complex::ZERO.unit_phase(), Complex::ONE);
    }

    #[test]
    fn test_argsort_desc() {
        assert_eq!(argsort_desc(&[1.0, 3.0, 2.0, 0.5]), vec![1, 2, 0, 3]);
    }
}
