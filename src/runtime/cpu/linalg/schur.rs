//! Complex Schur decomposition using QR iteration with Wilkinson shift
//!
//! The input is reduced to upper Hessenberg form and then driven to upper
//! triangular form with single-shift complex QR sweeps. Working in the
//! complex domain throughout avoids 2x2 blocks: the diagonal of `T` holds
//! every eigenvalue, real or not.

use super::super::jacobi::LinalgElement;
use super::decompositions::gehrd;
use crate::dtype::Complex;
use crate::runtime::{EigenFactors, HessenbergFactors, SchurFactors, Status};

/// Iterations per eigenvalue before giving up
const ITERATIONS_PER_EIGENVALUE: usize = 30;

/// Plane rotation `G = [[c, s], [−conj(s), c]]` with real `c`
#[derive(Debug, Clone, Copy)]
struct Givens {
    c: f64,
    s: Complex,
}

impl Givens {
    /// Rotation with `G·[x, y]ᵀ = [r, 0]ᵀ`
    fn zeroing(x: Complex, y: Complex) -> Self {
        let ax = x.magnitude();
        let ay = y.magnitude();
        if ay == 0.0 {
            return Self {
                c: 1.0,
                s: Complex::ZERO,
            };
        }
        if ax == 0.0 {
            return Self {
                c: 0.0,
                s: y.conj().scale(1.0 / ay),
            };
        }
        let r = ax.hypot(ay);
        Self {
            c: ax / r,
            s: x.scale(1.0 / ax) * y.conj().scale(1.0 / r),
        }
    }

    /// Rows `k` and `k + 1` of an `n x n` matrix, columns `cols`
    fn apply_rows(&self, a: &mut [Complex], n: usize, k: usize, cols: std::ops::Range<usize>) {
        let c = Complex::new(self.c, 0.0);
        for j in cols {
            let x = a[j * n + k];
            let y = a[j * n + k + 1];
            a[j * n + k] = c * x + self.s * y;
            a[j * n + k + 1] = c * y - self.s.conj() * x;
        }
    }

    /// Columns `k` and `k + 1` of an `n x n` matrix, multiplied by `Gᴴ`
    fn apply_columns(&self, a: &mut [Complex], n: usize, k: usize, rows: std::ops::Range<usize>) {
        let c = Complex::new(self.c, 0.0);
        for i in rows {
            let x = a[k * n + i];
            let y = a[(k + 1) * n + i];
            a[k * n + i] = c * x + self.s.conj() * y;
            a[(k + 1) * n + i] = c * y - self.s * x;
        }
    }
}

/// Complex Schur decomposition `A = Q·T·Qᴴ`
pub fn gees<T: LinalgElement>(n: usize, a: &[T]) -> SchurFactors {
    let ac: Vec<Complex> = a.iter().map(|v| v.to_complex()).collect();
    let HessenbergFactors { q, h } = gehrd(n, &ac);
    let mut t = h;
    let mut z = q;
    let status = qr_iterate(n, &mut t, &mut z);

    for j in 0..n {
        for i in (j + 1)..n {
            t[j * n + i] = Complex::ZERO;
        }
    }
    let eigenvalues = (0..n).map(|i| t[i * n + i]).collect();
    SchurFactors {
        q: z,
        t,
        eigenvalues,
        status,
    }
}

/// Drive an upper Hessenberg `t` to upper triangular form, accumulating the
/// rotations into `z`
fn qr_iterate(n: usize, t: &mut [Complex], z: &mut [Complex]) -> Status {
    if n < 2 {
        return Status::OK;
    }
    let eps = f64::EPSILON;
    let norm = t.iter().map(|v| v.magnitude()).fold(0.0, f64::max);
    let max_iter = ITERATIONS_PER_EIGENVALUE * n;
    let mut total = 0;
    let mut its = 0;
    let mut hi = n - 1;

    while hi > 0 {
        // Look for a negligible subdiagonal element
        let mut l = hi;
        while l > 0 {
            let mut s = t[(l - 1) * n + l - 1].magnitude() + t[l * n + l].magnitude();
            if s == 0.0 {
                s = norm;
            }
            if t[(l - 1) * n + l].magnitude() <= eps * s {
                t[(l - 1) * n + l] = Complex::ZERO;
                break;
            }
            l -= 1;
        }

        if l == hi {
            hi -= 1;
            its = 0;
            continue;
        }

        total += 1;
        its += 1;
        if total > max_iter {
            return Status::failed_at(hi + 1);
        }

        let mu = if its % 10 == 0 {
            // Exceptional shift to break cycles
            t[hi * n + hi] + Complex::new(0.75 * t[(hi - 1) * n + hi].magnitude(), 0.0)
        } else {
            wilkinson_shift(
                t[(hi - 1) * n + hi - 1],
                t[hi * n + hi - 1],
                t[(hi - 1) * n + hi],
                t[hi * n + hi],
            )
        };

        // Bulge chase over the active window l..=hi
        let mut x = t[l * n + l] - mu;
        let mut y = t[l * n + l + 1];
        for k in l..hi {
            if k > l {
                x = t[(k - 1) * n + k];
                y = t[(k - 1) * n + k + 1];
            }
            let g = Givens::zeroing(x, y);
            let start = if k > l { k - 1 } else { l };
            g.apply_rows(t, n, k, start..n);
            g.apply_columns(t, n, k, 0..(k + 3).min(hi + 1));
            g.apply_columns(z, n, k, 0..n);
            if k > l {
                t[(k - 1) * n + k + 1] = Complex::ZERO;
            }
        }
    }
    Status::OK
}

/// Eigenvalue of `[[a, b], [c, d]]` closest to `d`
fn wilkinson_shift(a: Complex, b: Complex, c: Complex, d: Complex) -> Complex {
    let half = Complex::new(0.5, 0.0);
    let mean = (a + d) * half;
    let diff = (a - d) * half;
    let disc = (diff * diff + b * c).sqrt();
    let mu1 = mean + disc;
    let mu2 = mean - disc;
    if (mu1 - d).magnitude() <= (mu2 - d).magnitude() {
        mu1
    } else {
        mu2
    }
}

/// Eigenvalues and unit-norm right eigenvectors
///
/// Uses the Schur decomposition followed by eigenvector extraction via
/// back-substitution on `T`.
pub fn geev<T: LinalgElement>(n: usize, a: &[T]) -> EigenFactors {
    let schur = gees(n, a);
    let t = &schur.t;
    let norm = t.iter().map(|v| v.magnitude()).fold(0.0, f64::max);
    let small = (norm * f64::EPSILON).max(f64::MIN_POSITIVE);
    let mut vectors = vec![Complex::ZERO; n * n];

    for k in 0..n {
        let lambda = t[k * n + k];
        let mut y = vec![Complex::ZERO; n];
        y[k] = Complex::ONE;
        for i in (0..k).rev() {
            let mut sum = Complex::ZERO;
            for j in (i + 1)..=k {
                sum += t[j * n + i] * y[j];
            }
            let mut denom = t[i * n + i] - lambda;
            if denom.magnitude() < small {
                denom = Complex::new(small, 0.0);
            }
            y[i] = -(sum / denom);
        }

        // x = Z·y
        let column = &mut vectors[k * n..(k + 1) * n];
        for (j, &yj) in y.iter().enumerate().take(k + 1) {
            for (i, out) in column.iter_mut().enumerate() {
                *out += schur.q[j * n + i] * yj;
            }
        }
        let len = column.iter().map(|v| v.magnitude_squared()).sum::<f64>().sqrt();
        if len > 0.0 {
            for v in column.iter_mut() {
                *v = v.scale(1.0 / len);
            }
        }
    }

    EigenFactors { schur, vectors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::linalg::blas::{adjoint, matmul_kernel};

    fn product(n: usize, a: &[Complex], b: &[Complex]) -> Vec<Complex> {
        let mut c = vec![Complex::ZERO; n * n];
        matmul_kernel(n, n, n, a, b, &mut c);
        c
    }

    fn sorted_by_imag(mut values: Vec<Complex>) -> Vec<Complex> {
        values.sort_by(|a, b| a.im.total_cmp(&b.im).then(a.re.total_cmp(&b.re)));
        values
    }

    #[test]
    fn test_rotation_matrix_has_imaginary_eigenvalues() {
        let a = vec![0.0, 1.0, -1.0, 0.0];
        let f = gees(2, &a);
        assert!(f.status.is_ok());
        let w = sorted_by_imag(f.eigenvalues.clone());
        assert!((w[0] - Complex::new(0.0, -1.0)).magnitude() < 1e-12);
        assert!((w[1] - Complex::I).magnitude() < 1e-12);
    }

    #[test]
    fn test_schur_reconstructs() {
        let a: Vec<f64> = vec![4.0, 1.0, -2.0, 2.0, 3.0, 0.5, 1.0, -1.0, 5.0];
        let f = gees(3, &a);
        assert!(f.status.is_ok());
        assert_eq!(f.t[2], Complex::ZERO);
        let back = product(3, &product(3, &f.q, &f.t), &adjoint(3, 3, &f.q));
        for (x, &y) in back.iter().zip(&a) {
            assert!((*x - Complex::new(y, 0.0)).magnitude() < 1e-10);
        }
        let trace: Complex = f.eigenvalues.iter().fold(Complex::ZERO, |acc, &v| acc + v);
        assert!((trace - Complex::new(12.0, 0.0)).magnitude() < 1e-10);
    }

    #[test]
    fn test_eigenvectors_satisfy_definition() {
        let a = vec![
            Complex::new(2.0, 1.0),
            Complex::new(0.0, 1.0),
            Complex::new(1.0, 0.0),
            Complex::new(1.0, 0.0),
            Complex::new(3.0, 0.0),
            Complex::new(0.0, -1.0),
            Complex::new(0.5, 0.0),
            Complex::new(1.0, 1.0),
            Complex::new(-1.0, 0.0),
        ];
        let f = geev(3, &a);
        assert!(f.schur.status.is_ok());
        for k in 0..3 {
            let lambda = f.schur.eigenvalues[k];
            let v = &f.vectors[k * 3..(k + 1) * 3];
            for i in 0..3 {
                let av: Complex = (0..3).fold(Complex::ZERO, |acc, j| acc + a[j * 3 + i] * v[j]);
                assert!((av - lambda * v[i]).magnitude() < 1e-9);
            }
        }
    }
}
