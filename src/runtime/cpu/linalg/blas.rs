//! Level 1-3 BLAS kernels over column-major buffers

use super::super::jacobi::LinalgElement;
use crate::dtype::Arithmetic;

/// Column count above which the matrix product is split across rayon workers
#[cfg(feature = "rayon")]
const PARALLEL_COLUMNS: usize = 64;

/// Matrix product `C = A·B` for any coefficient arithmetic
///
/// `A` is `m x k`, `B` is `k x n`, `C` is `m x n`, all column-major. `C` is
/// overwritten. Each output column depends on one column of `B` only, so
/// wide products are computed one column per rayon task.
///
/// # Algorithm
/// ```text
/// for j in 0..n:
///     for p in 0..k:
///         c[:, j] += a[:, p] * b[p, j]     (jki order, unit stride on A and C)
/// ```
pub fn matmul_kernel<T: Arithmetic>(m: usize, n: usize, k: usize, a: &[T], b: &[T], c: &mut [T]) {
    debug_assert_eq!(a.len(), m * k);
    debug_assert_eq!(b.len(), k * n);
    debug_assert_eq!(c.len(), m * n);
    if m == 0 || n == 0 {
        return;
    }

    let column = |j: usize, out: &mut [T]| {
        out.fill(T::zero());
        for p in 0..k {
            let b_pj = b[j * k + p];
            if b_pj.is_zero() {
                continue;
            }
            let a_col = &a[p * m..(p + 1) * m];
            for (o, &a_ip) in out.iter_mut().zip(a_col) {
                *o = o.plus(a_ip.times(b_pj));
            }
        }
    };

    #[cfg(feature = "rayon")]
    if n >= PARALLEL_COLUMNS && m * k >= PARALLEL_COLUMNS {
        use rayon::prelude::*;
        c.par_chunks_mut(m)
            .enumerate()
            .for_each(|(j, out)| column(j, out));
        return;
    }

    for (j, out) in c.chunks_mut(m).enumerate() {
        column(j, out);
    }
}

/// `C ← α·A·B + β·C`
#[allow(clippy::too_many_arguments)]
pub fn gemm<T: LinalgElement>(
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    b: &[T],
    beta: T,
    c: &mut [T],
) {
    let mut product = vec![T::zero(); m * n];
    matmul_kernel(m, n, k, a, b, &mut product);
    for (ci, pi) in c.iter_mut().zip(product) {
        *ci = alpha * pi + beta * *ci;
    }
}

/// `y ← α·A·x + β·y`
#[allow(clippy::too_many_arguments)]
pub fn gemv<T: LinalgElement>(m: usize, n: usize, alpha: T, a: &[T], x: &[T], beta: T, y: &mut [T]) {
    for yi in y.iter_mut() {
        *yi = beta * *yi;
    }
    for (j, &xj) in x.iter().enumerate().take(n) {
        let s = alpha * xj;
        for (yi, &aij) in y.iter_mut().zip(&a[j * m..(j + 1) * m]) {
            *yi = *yi + aij * s;
        }
    }
}

/// `y ← α·x + y`
pub fn axpy<T: LinalgElement>(alpha: T, x: &[T], y: &mut [T]) {
    for (yi, &xi) in y.iter_mut().zip(x) {
        *yi = *yi + alpha * xi;
    }
}

/// `x ← α·x`
pub fn scal<T: LinalgElement>(alpha: T, x: &mut [T]) {
    for xi in x.iter_mut() {
        *xi = alpha * *xi;
    }
}

/// Column-major conjugate transpose of an `m x n` buffer
pub fn adjoint<T: LinalgElement>(m: usize, n: usize, a: &[T]) -> Vec<T> {
    let mut out = vec![T::zero(); m * n];
    for j in 0..n {
        for i in 0..m {
            out[i * n + j] = a[j * m + i].conj();
        }
    }
    out
}
