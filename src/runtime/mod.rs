//! Back-end interfaces consumed by the matrix containers
//!
//! The containers never implement dense numerics themselves. They
//! materialise their pending transforms, hand tightly packed column-major
//! buffers to a [`LinAlg`] back-end and turn the returned status codes into
//! empty results or `ok == false` flags.
//!
//! # Architecture
//!
//! ```text
//! LinAlg (dense kernels over column-major buffers)
//! └── CpuLinAlg (built-in pure-Rust implementation)
//! Prng (caller-owned random source)
//! └── every rand::Rng
//! ```

pub mod cpu;

pub use cpu::CpuLinAlg;
pub use cpu::jacobi::LinalgElement;

use crate::dtype::Complex;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use rand_distr::StandardNormal;

/// Kernel status code
///
/// Zero means success. A positive value names the (one-based) position at
/// which the kernel broke down, mirroring LAPACK's `info` output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Status(pub i32);

impl Status {
    /// Success
    pub const OK: Self = Self(0);

    /// Failure at a one-based position
    #[inline]
    pub fn failed_at(position: usize) -> Self {
        Self(i32::try_from(position).unwrap_or(i32::MAX).max(1))
    }

    /// True for a zero status
    #[inline]
    pub fn is_ok(self) -> bool {
        self.0 == 0
    }
}

/// Full QR factors: `Q` is `m x m` unitary, `R` is `m x n` upper triangular
#[derive(Clone, Debug)]
pub struct QrFactors<T> {
    /// Column-major `m x m`
    pub q: Vec<T>,
    /// Column-major `m x n`
    pub r: Vec<T>,
}

/// Full LQ factors: `L` is `m x n` lower triangular, `Q` is `n x n` unitary
#[derive(Clone, Debug)]
pub struct LqFactors<T> {
    /// Column-major `m x n`
    pub l: Vec<T>,
    /// Column-major `n x n`
    pub q: Vec<T>,
}

/// Thin singular value decomposition `A = U Σ Vᴴ` with `k = min(m, n)`
#[derive(Clone, Debug)]
pub struct SvdFactors<T> {
    /// Column-major `m x k`
    pub u: Vec<T>,
    /// `k` singular values in descending order
    pub s: Vec<f64>,
    /// Column-major `k x n`
    pub vt: Vec<T>,
    /// Non-zero if the sweeps did not converge
    pub status: Status,
}

/// `A = Q H Qᴴ` with `H` upper Hessenberg
#[derive(Clone, Debug)]
pub struct HessenbergFactors<T> {
    /// Column-major `n x n`
    pub q: Vec<T>,
    /// Column-major `n x n`
    pub h: Vec<T>,
}

/// Complex Schur form `A = Q T Qᴴ`
#[derive(Clone, Debug)]
pub struct SchurFactors {
    /// Column-major `n x n` unitary
    pub q: Vec<Complex>,
    /// Column-major `n x n` upper triangular
    pub t: Vec<Complex>,
    /// Diagonal of `T`
    pub eigenvalues: Vec<Complex>,
    /// Non-zero if the QR iteration did not converge
    pub status: Status,
}

/// Eigenvalues and unit-norm right eigenvectors
#[derive(Clone, Debug)]
pub struct EigenFactors {
    /// Schur factors the eigenvectors were derived from
    pub schur: SchurFactors,
    /// Column-major `n x n`, one eigenvector per column
    pub vectors: Vec<Complex>,
}

/// Row and column scale factors that equilibrate a matrix
#[derive(Clone, Debug)]
pub struct EquilibrationFactors {
    /// One factor per row
    pub r: Vec<f64>,
    /// One factor per column
    pub c: Vec<f64>,
    /// Non-zero if a row or column is entirely zero
    pub status: Status,
}

/// Dense linear-algebra kernels
///
/// All buffers are tightly packed column-major. Kernels never allocate the
/// caller's output and never fail except through their [`Status`].
pub trait LinAlg: Send + Sync {
    /// `C ← α·A·B + β·C` with `A: m x k`, `B: k x n`, `C: m x n`
    #[allow(clippy::too_many_arguments)]
    fn gemm<T: LinalgElement>(
        &self,
        m: usize,
        n: usize,
        k: usize,
        alpha: T,
        a: &[T],
        b: &[T],
        beta: T,
        c: &mut [T],
    );

    /// `y ← α·A·x + β·y` with `A: m x n`
    #[allow(clippy::too_many_arguments)]
    fn gemv<T: LinalgElement>(
        &self,
        m: usize,
        n: usize,
        alpha: T,
        a: &[T],
        x: &[T],
        beta: T,
        y: &mut [T],
    );

    /// `y ← α·x + y`
    fn axpy<T: LinalgElement>(&self, alpha: T, x: &[T], y: &mut [T]);

    /// `x ← α·x`
    fn scal<T: LinalgElement>(&self, alpha: T, x: &mut [T]);

    /// LU factorisation with partial pivoting, in place
    ///
    /// `ipiv[i]` receives the zero-based row interchanged with row `i`.
    /// A zero pivot yields a positive status; the factorisation is still
    /// completed.
    fn getrf<T: LinalgElement>(&self, m: usize, n: usize, a: &mut [T], ipiv: &mut [usize])
    -> Status;

    /// Solve `A·X = B` from a [`LinAlg::getrf`] factorisation, in place
    fn getrs<T: LinalgElement>(
        &self,
        n: usize,
        nrhs: usize,
        lu: &[T],
        ipiv: &[usize],
        b: &mut [T],
    ) -> Status;

    /// Householder QR factorisation
    fn geqrf<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> QrFactors<T>;

    /// LQ factorisation
    fn gelqf<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> LqFactors<T>;

    /// Cholesky factorisation of a Hermitian positive definite matrix
    ///
    /// On success the lower triangle of `a` holds `L` and the strict upper
    /// triangle is zeroed.
    fn potrf<T: LinalgElement>(&self, n: usize, a: &mut [T]) -> Status;

    /// Thin singular value decomposition
    fn gesdd<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> SvdFactors<T>;

    /// Householder reduction to upper Hessenberg form
    fn gehrd<T: LinalgElement>(&self, n: usize, a: &[T]) -> HessenbergFactors<T>;

    /// Complex Schur decomposition
    fn gees<T: LinalgElement>(&self, n: usize, a: &[T]) -> SchurFactors;

    /// Eigenvalues and right eigenvectors
    fn geev<T: LinalgElement>(&self, n: usize, a: &[T]) -> EigenFactors;

    /// Maximum absolute column sum
    fn one_norm<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> f64;

    /// Maximum absolute row sum
    fn infinity_norm<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> f64;

    /// Two-norm condition number `σ_max / σ_min`
    fn condition_number<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> f64;

    /// Row and column scalings that bring the largest entry of every row and
    /// column close to one
    fn equilibrate<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> EquilibrationFactors;

    /// Forward discrete Fourier transform (unnormalised)
    fn dft(&self, x: &[Complex]) -> Vec<Complex>;

    /// Inverse discrete Fourier transform, scaled by `1/n`
    fn idft(&self, x: &[Complex]) -> Vec<Complex>;

    /// Orthonormal DCT-II
    fn dct(&self, x: &[f64]) -> Vec<f64>;

    /// Orthonormal DCT-III, the inverse of [`LinAlg::dct`]
    fn idct(&self, x: &[f64]) -> Vec<f64>;
}

/// Caller-owned source of random numbers
///
/// Matrix generators call it sequentially, one draw per coefficient (two
/// for complex coefficients). Every [`rand::Rng`] is a `Prng`.
pub trait Prng {
    /// Uniform draw from `[0, 1)`
    fn next_uniform(&mut self) -> f64;

    /// Standard normal draw
    fn next_normal(&mut self) -> f64;

    /// Uniform integer from `low..=high`; callers guarantee `low <= high`
    fn next_integer(&mut self, low: i64, high: i64) -> i64;

    /// `true` with probability `p`; callers guarantee `0 <= p <= 1`
    fn next_boolean(&mut self, p: f64) -> bool;
}

impl<R: Rng + ?Sized> Prng for R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        StandardUniform.sample(self)
    }

    #[inline]
    fn next_normal(&mut self) -> f64 {
        StandardNormal.sample(self)
    }

    #[inline]
    fn next_integer(&mut self, low: i64, high: i64) -> i64 {
        self.random_range(low..=high)
    }

    #[inline]
    fn next_boolean(&mut self, p: f64) -> bool {
        self.random_bool(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_status() {
        assert!(Status::OK.is_ok());
        assert!(!Status::failed_at(3).is_ok());
        assert_eq!(Status::failed_at(0), Status(1));
    }

    #[test]
    fn test_rng_is_prng() {
        fn draw<P: Prng + ?Sized>(prng: &mut P) -> (f64, i64, bool) {
            (prng.next_uniform(), prng.next_integer(4, 4), prng.next_boolean(1.0))
        }
        let (u, k, b) = draw(&mut StdRng::seed_from_u64(11));
        assert!((0.0..1.0).contains(&u));
        assert_eq!(k, 4);
        assert!(b);
    }
}
