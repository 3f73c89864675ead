//! LU, Cholesky, QR, LQ and Hessenberg factorisations
//!
//! Every routine works on column-major buffers: element `(i, j)` of an
//! `m x n` matrix is `a[j * m + i]`.

use super::super::jacobi::{LinalgElement, identity_matrix};
use super::blas::adjoint;
use crate::runtime::{HessenbergFactors, LqFactors, QrFactors, Status};

/// Householder reflector `H = I − β·v·vᴴ` with `H·x = α·e₁`
pub(crate) struct Reflector<T> {
    v: Vec<T>,
    beta: f64,
}

impl<T: LinalgElement> Reflector<T> {
    /// Reflector that maps `x` onto a multiple of the first unit vector
    ///
    /// Returns `None` when `x` is zero (the identity does the job).
    ///
    /// # Algorithm
    /// ```text
    /// α = −phase(x₀)·‖x‖
    /// v = x − α·e₁
    /// β = 2 / (vᴴ v)
    /// ```
    pub(crate) fn new(x: &[T]) -> Option<Self> {
        let norm = x.iter().map(|v| v.abs2()).sum::<f64>().sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return None;
        }
        let alpha = x[0].unit_phase() * T::from_real(-norm);
        let mut v = x.to_vec();
        v[0] = v[0] - alpha;
        let v_norm_sq: f64 = v.iter().map(|e| e.abs2()).sum();
        if v_norm_sq == 0.0 {
            return None;
        }
        Some(Self {
            v,
            beta: 2.0 / v_norm_sq,
        })
    }

    /// `A ← H·A` on rows `row0..row0 + len(v)` and columns `cols` of an
    /// `m`-row column-major matrix
    pub(crate) fn apply_left(
        &self,
        a: &mut [T],
        m: usize,
        row0: usize,
        cols: std::ops::Range<usize>,
    ) {
        let beta = T::from_real(self.beta);
        for j in cols {
            let column = &mut a[j * m + row0..j * m + row0 + self.v.len()];
            let w = self
                .v
                .iter()
                .zip(column.iter())
                .fold(T::zero(), |acc, (&vi, &ai)| acc + vi.conj() * ai);
            let w = beta * w;
            for (ai, &vi) in column.iter_mut().zip(&self.v) {
                *ai = *ai - vi * w;
            }
        }
    }

    /// `A ← A·H` on rows `rows` and columns `col0..col0 + len(v)` of an
    /// `m`-row column-major matrix
    pub(crate) fn apply_right(
        &self,
        a: &mut [T],
        m: usize,
        rows: std::ops::Range<usize>,
        col0: usize,
    ) {
        let beta = T::from_real(self.beta);
        for i in rows {
            let mut w = T::zero();
            for (l, &vl) in self.v.iter().enumerate() {
                w = w + a[(col0 + l) * m + i] * vl;
            }
            let w = beta * w;
            for (l, &vl) in self.v.iter().enumerate() {
                let idx = (col0 + l) * m + i;
                a[idx] = a[idx] - w * vl.conj();
            }
        }
    }
}

/// LU decomposition with partial pivoting (Doolittle algorithm)
///
/// On return `a` holds `L` (unit diagonal, strictly below) and `U` (on and
/// above the diagonal). The factorisation runs to completion even when a
/// pivot is zero; the status names the first zero pivot.
pub fn getrf<T: LinalgElement>(m: usize, n: usize, a: &mut [T], ipiv: &mut [usize]) -> Status {
    let k = m.min(n);
    let mut status = Status::OK;

    for col in 0..k {
        // Find pivot: max absolute value in column col, rows col..m
        let mut pivot_row = col;
        let mut max_val = a[col * m + col].abs_val();
        for row in (col + 1)..m {
            let val = a[col * m + row].abs_val();
            if val > max_val {
                max_val = val;
                pivot_row = row;
            }
        }
        ipiv[col] = pivot_row;

        if pivot_row != col {
            for j in 0..n {
                a.swap(j * m + col, j * m + pivot_row);
            }
        }

        let pivot = a[col * m + col];
        if pivot.abs_val() == 0.0 {
            if status.is_ok() {
                status = Status::failed_at(col + 1);
            }
            continue;
        }

        // Compute multipliers (L column)
        for row in (col + 1)..m {
            a[col * m + row] = a[col * m + row] / pivot;
        }

        // Update trailing submatrix
        for j in (col + 1)..n {
            let u = a[j * m + col];
            if u.is_zero() {
                continue;
            }
            for row in (col + 1)..m {
                let l = a[col * m + row];
                a[j * m + row] = a[j * m + row] - l * u;
            }
        }
    }
    status
}

/// Solve `A·X = B` for `n x n` `A` factored by [`getrf`]
///
/// `b` is `n x nrhs` and is overwritten with `X`.
pub fn getrs<T: LinalgElement>(n: usize, nrhs: usize, lu: &[T], ipiv: &[usize], b: &mut [T]) -> Status {
    for i in 0..n {
        if lu[i * n + i].abs_val() == 0.0 {
            return Status::failed_at(i + 1);
        }
    }
    for col in 0..nrhs {
        let x = &mut b[col * n..(col + 1) * n];
        for (i, &p) in ipiv.iter().enumerate().take(n) {
            if p != i {
                x.swap(i, p);
            }
        }
        // Forward substitution with unit L
        for i in 0..n {
            let mut sum = x[i];
            for j in 0..i {
                sum = sum - lu[j * n + i] * x[j];
            }
            x[i] = sum;
        }
        // Back substitution with U
        for i in (0..n).rev() {
            let mut sum = x[i];
            for j in (i + 1)..n {
                sum = sum - lu[j * n + i] * x[j];
            }
            x[i] = sum / lu[i * n + i];
        }
    }
    Status::OK
}

/// Cholesky decomposition (Cholesky-Banachiewicz algorithm), lower triangle
///
/// Reads the lower triangle of the Hermitian matrix `a`. Fails with the
/// position of the first non-positive pivot.
pub fn potrf<T: LinalgElement>(n: usize, a: &mut [T]) -> Status {
    for j in 0..n {
        let mut diag = a[j * n + j].real();
        for k in 0..j {
            diag -= a[k * n + j].abs2();
        }
        if !(diag > 0.0) || !diag.is_finite() {
            return Status::failed_at(j + 1);
        }
        let l_jj = diag.sqrt();
        a[j * n + j] = T::from_real(l_jj);

        let inv = T::from_real(1.0 / l_jj);
        for i in (j + 1)..n {
            let mut sum = a[j * n + i];
            for k in 0..j {
                sum = sum - a[k * n + i] * a[k * n + j].conj();
            }
            a[j * n + i] = sum * inv;
        }
    }
    for j in 1..n {
        for i in 0..j {
            a[j * n + i] = T::zero();
        }
    }
    Status::OK
}

/// Householder QR decomposition, `A = Q·R`
///
/// `Q` is the full `m x m` unitary factor accumulated as `H₁·H₂·…`.
pub fn geqrf<T: LinalgElement>(m: usize, n: usize, a: &[T]) -> QrFactors<T> {
    let mut r = a.to_vec();
    let mut q = identity_matrix::<T>(m);
    let steps = m.saturating_sub(1).min(n);

    for k in 0..steps {
        let x = &r[k * m + k..(k + 1) * m];
        if let Some(h) = Reflector::new(x) {
            h.apply_left(&mut r, m, k, k..n);
            h.apply_right(&mut q, m, 0..m, k);
        }
    }

    for j in 0..n {
        for i in (j + 1)..m {
            r[j * m + i] = T::zero();
        }
    }
    QrFactors { q, r }
}

/// LQ decomposition, `A = L·Q`, computed from the QR factors of `Aᴴ`
pub fn gelqf<T: LinalgElement>(m: usize, n: usize, a: &[T]) -> LqFactors<T> {
    let ah = adjoint(m, n, a);
    let QrFactors { q, r } = geqrf(n, m, &ah);
    LqFactors {
        l: adjoint(n, m, &r),
        q: adjoint(n, n, &q),
    }
}

/// Reduction to upper Hessenberg form, `A = Q·H·Qᴴ`
pub fn gehrd<T: LinalgElement>(n: usize, a: &[T]) -> HessenbergFactors<T> {
    let mut h = a.to_vec();
    let mut q = identity_matrix::<T>(n);

    for k in 0..n.saturating_sub(2) {
        let x = &h[k * n + k + 1..(k + 1) * n];
        if let Some(refl) = Reflector::new(x) {
            refl.apply_left(&mut h, n, k + 1, k..n);
            refl.apply_right(&mut h, n, 0..n, k + 1);
            refl.apply_right(&mut q, n, 0..n, k + 1);
        }
    }

    for j in 0..n {
        for i in (j + 2)..n {
            h[j * n + i] = T::zero();
        }
    }
    HessenbergFactors { q, h }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex;
    use crate::runtime::cpu::linalg::blas::matmul_kernel;

    fn product<T: LinalgElement>(m: usize, k: usize, n: usize, a: &[T], b: &[T]) -> Vec<T> {
        let mut c = vec![T::zero(); m * n];
        matmul_kernel(m, n, k, a, b, &mut c);
        c
    }

    fn assert_close<T: LinalgElement>(a: &[T], b: &[T], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((*x - *y).abs_val() < tol, "{x} vs {y}");
        }
    }

    #[test]
    fn test_lu_solve() {
        // [[2, 1], [4, 3]] x = [3, 7] -> x = [1, 1]
        let mut lu = vec![2.0, 4.0, 1.0, 3.0];
        let mut ipiv = vec![0; 2];
        assert!(getrf(2, 2, &mut lu, &mut ipiv).is_ok());
        assert_eq!(ipiv, vec![1, 1]);
        let mut b = vec![3.0, 7.0];
        assert!(getrs(2, 1, &lu, &ipiv, &mut b).is_ok());
        assert_close(&b, &[1.0, 1.0], 1e-12);
    }

    #[test]
    fn test_lu_singular_status() {
        let mut lu = vec![1.0, 2.0, 2.0, 4.0];
        let mut ipiv = vec![0; 2];
        assert_eq!(getrf(2, 2, &mut lu, &mut ipiv), Status(2));
        let mut b = vec![1.0, 1.0];
        assert!(!getrs(2, 1, &lu, &ipiv, &mut b).is_ok());
    }

    #[test]
    fn test_cholesky() {
        let mut a = vec![4.0, 2.0, 2.0, 3.0];
        assert!(potrf(2, &mut a).is_ok());
        assert_close(&a, &[2.0, 1.0, 0.0, 2.0f64.sqrt()], 1e-12);

        let mut not_pd = vec![1.0, 2.0, 2.0, 1.0];
        assert_eq!(potrf(2, &mut not_pd), Status(2));
    }

    #[test]
    fn test_qr_reconstructs_complex() {
        let a = vec![
            Complex::new(1.0, 1.0),
            Complex::new(2.0, 0.0),
            Complex::new(0.0, -1.0),
            Complex::new(3.0, 0.0),
            Complex::new(1.0, 2.0),
            Complex::new(-1.0, 0.5),
        ];
        let QrFactors { q, r } = geqrf(3, 2, &a);
        assert_close(&product(3, 3, 2, &q, &r), &a, 1e-12);
        let qhq = product(3, 3, 3, &adjoint(3, 3, &q), &q);
        assert_close(&qhq, &identity_matrix::<Complex>(3), 1e-12);
        assert!(r[2].abs_val() < 1e-15);
    }

    #[test]
    fn test_lq_reconstructs() {
        let a = vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        let LqFactors { l, q } = gelqf(2, 3, &a);
        assert_close(&product(2, 3, 3, &l, &q), &a, 1e-12);
        // strictly upper part of L is zero
        assert_eq!(l[2], 0.0);
    }

    #[test]
    fn test_hessenberg() {
        let a: Vec<f64> = (0..16).map(|v| ((v * 7) % 11) as f64 - 3.0).collect();
        let HessenbergFactors { q, h } = gehrd(4, &a);
        for j in 0..4 {
            for i in (j + 2)..4 {
                assert_eq!(h[j * 4 + i], 0.0);
            }
        }
        let qhqt = product(4, 4, 4, &product(4, 4, 4, &q, &h), &adjoint(4, 4, &q));
        assert_close(&qhqt, &a, 1e-10);
    }
}
