//! Singular Value Decomposition (SVD) using One-Sided Jacobi algorithm

use super::super::jacobi::{
    JacobiRotation, LinalgElement, apply_phase_to_column, apply_rotation_to_columns,
    argsort_desc, compute_gram_elements, identity_matrix, normalize_columns, permute_columns,
};
use super::blas::adjoint;
use crate::runtime::{Status, SvdFactors};

const MAX_SWEEPS: usize = 60;

/// Thin SVD `A = U·Σ·Vᴴ` of an `m x n` column-major matrix
///
/// Algorithm: One-Sided Jacobi SVD
/// 1. If m < n: decompose Aᴴ and swap U ↔ V
/// 2. Initialize: B = A (working copy), V = I_n
/// 3. REPEAT (max 60 sweeps):
///    FOR each pair (p, q) where p < q:
///      - Gram elements: a_pp, a_qq, γ = B[:,p]ᴴ·B[:,q]
///      - If |γ| > tol: rotate column q by the phase of γ, then apply the
///        real Jacobi rotation to B and V
/// 4. Extract: S[j] = ||B[:,j]||, U[:,j] = B[:,j]/S[j]
/// 5. Sort S descending, reorder U and V columns accordingly
/// 6. Complete U to orthonormal columns where S[j] = 0
pub fn gesdd<T: LinalgElement>(m: usize, n: usize, a: &[T]) -> SvdFactors<T> {
    if m < n {
        let ah = adjoint(m, n, a);
        let SvdFactors { u, s, vt, status } = gesdd(n, m, &ah);
        // Aᴴ = U'·Σ·V'ᴴ  =>  A = V'·Σ·U'ᴴ
        return SvdFactors {
            u: adjoint(m, m, &vt),
            s,
            vt: adjoint(n, m, &u),
            status,
        };
    }

    if n == 0 {
        return SvdFactors {
            u: Vec::new(),
            s: Vec::new(),
            vt: Vec::new(),
            status: Status::OK,
        };
    }

    let mut b = a.to_vec();
    let mut v: Vec<T> = identity_matrix(n);
    let eps = T::epsilon_val();
    let tol = (m as f64) * eps;
    let mut converged = false;

    for _sweep in 0..MAX_SWEEPS {
        let mut rotated = false;
        for p in 0..n {
            for q in (p + 1)..n {
                let (a_pp, a_qq, gamma) = compute_gram_elements(&b, m, p, q);
                let g = gamma.abs_val();
                if g == 0.0 || g <= tol * (a_pp * a_qq).sqrt() {
                    continue;
                }
                rotated = true;

                // Make the off-diagonal element real and positive
                let phase = gamma.unit_phase().conj();
                apply_phase_to_column(&mut b, m, q, phase);
                apply_phase_to_column(&mut v, n, q, phase);

                let rot = JacobiRotation::compute(a_pp, a_qq, g);
                apply_rotation_to_columns(&mut b, m, p, q, &rot);
                apply_rotation_to_columns(&mut v, n, p, q, &rot);
            }
        }
        if !rotated {
            converged = true;
            break;
        }
    }

    let norms = normalize_columns(&mut b, m, n, 0.0);
    let order = argsort_desc(&norms);
    let s: Vec<f64> = order.iter().map(|&j| norms[j]).collect();
    let mut u = permute_columns(&b, m, &order);
    let v = permute_columns(&v, n, &order);

    let scale = s.first().copied().unwrap_or(0.0);
    complete_orthonormal_columns(&mut u, m, n, &s, scale * (m as f64) * eps);

    SvdFactors {
        u,
        s,
        vt: adjoint(n, n, &v),
        status: if converged {
            Status::OK
        } else {
            Status::failed_at(MAX_SWEEPS)
        },
    }
}

/// Replace the columns of `u` whose singular value is negligible with unit
/// vectors orthogonal to every other column (modified Gram-Schmidt)
fn complete_orthonormal_columns<T: LinalgElement>(
    u: &mut [T],
    m: usize,
    k: usize,
    s: &[f64],
    threshold: f64,
) {
    let mut valid: Vec<bool> = s.iter().map(|&sigma| sigma > threshold).collect();
    let mut candidate = 0;

    for j in 0..k {
        if valid[j] {
            continue;
        }
        while candidate < m {
            let mut column = vec![T::zero(); m];
            column[candidate] = T::one();
            candidate += 1;

            for (other, _) in valid.iter().enumerate().filter(|(_, ok)| **ok) {
                let basis = &u[other * m..(other + 1) * m];
                let dot = basis
                    .iter()
                    .zip(&column)
                    .fold(T::zero(), |acc, (&b, &c)| acc + b.conj() * c);
                for (c, &b) in column.iter_mut().zip(basis) {
                    *c = *c - b * dot;
                }
            }

            let norm = column.iter().map(|c| c.abs2()).sum::<f64>().sqrt();
            if norm > 1e-8 {
                let inv = T::from_real(1.0 / norm);
                for (dst, c) in u[j * m..(j + 1) * m].iter_mut().zip(column) {
                    *dst = c * inv;
                }
                valid[j] = true;
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex;
    use crate::runtime::cpu::linalg::blas::matmul_kernel;

    fn reconstruct<T: LinalgElement>(m: usize, n: usize, f: &SvdFactors<T>) -> Vec<T> {
        let k = f.s.len();
        let mut us = f.u.clone();
        for (j, &sigma) in f.s.iter().enumerate() {
            for v in &mut us[j * m..(j + 1) * m] {
                *v = *v * T::from_real(sigma);
            }
        }
        let mut out = vec![T::zero(); m * n];
        matmul_kernel(m, n, k, &us, &f.vt, &mut out);
        out
    }

    #[test]
    fn test_svd_diagonal() {
        let a = vec![3.0, 0.0, 0.0, 4.0];
        let f = gesdd(2, 2, &a);
        assert!(f.status.is_ok());
        assert!((f.s[0] - 4.0).abs() < 1e-12);
        assert!((f.s[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_svd_reconstructs_wide_complex() {
        let a = vec![
            Complex::new(1.0, 2.0),
            Complex::new(0.0, 1.0),
            Complex::new(3.0, -1.0),
            Complex::new(2.0, 0.0),
            Complex::new(-1.0, 0.5),
            Complex::new(1.0, 1.0),
        ];
        let f = gesdd(2, 3, &a);
        assert_eq!(f.s.len(), 2);
        assert_eq!(f.u.len(), 4);
        assert_eq!(f.vt.len(), 6);
        assert!(f.s[0] >= f.s[1]);
        let back = reconstruct(2, 3, &f);
        for (x, y) in back.iter().zip(&a) {
            assert!((*x - *y).abs_val() < 1e-12);
        }
    }

    #[test]
    fn test_svd_rank_deficient_keeps_orthonormal_u() {
        // rank one: every column is a multiple of [1, 2, 2]
        let a = vec![1.0, 2.0, 2.0, 2.0, 4.0, 4.0];
        let f = gesdd(3, 2, &a);
        assert!((f.s[0] - 9.0f64.sqrt() * 5.0f64.sqrt()).abs() < 1e-12);
        assert!(f.s[1].abs() < 1e-12);
        let dot: f64 = (0..3).map(|i| f.u[i] * f.u[3 + i]).sum();
        assert!(dot.abs() < 1e-12);
        let norm: f64 = (0..3).map(|i| f.u[3 + i] * f.u[3 + i]).sum();
        assert!((norm - 1.0).abs() < 1e-12);
        let back = reconstruct(3, 2, &f);
        for (x, y) in back.iter().zip(&a) {
            assert!((x - y).abs() < 1e-12);
        }
    }
}
