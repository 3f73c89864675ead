//! Linear-algebra services
//!
//! Every service materialises the logical value of the handle into a
//! column-major buffer, runs the [`CpuLinAlg`] kernels on it and wraps the
//! results back into matrices. Integer and boolean matrices reach these
//! methods through promotion in the [`ops`](crate::ops) façade.
//!
//! Failures of the numerics (a singular matrix, a matrix that is not
//! positive definite, a rank-deficient least-squares problem) are reported
//! as an empty matrix or an `ok == false` flag. [`LinalgOptions::strict`]
//! turns the empty-matrix sentinels into [`Error::Singular`].

use super::{Matrix, MatrixComplex, MatrixReal};
use crate::dtype::{Complex, Element};
use crate::error::{Error, Result};
use crate::runtime::{
    CpuLinAlg, EigenFactors, EquilibrationFactors, HessenbergFactors, LinAlg, LinalgElement,
    LqFactors, QrFactors, SchurFactors,
};
use tracing::debug;

const BACKEND: CpuLinAlg = CpuLinAlg;

/// Relative tolerance of the Hermitian check preceding a Cholesky
/// factorisation
const HERMITIAN_TOLERANCE: f64 = 1e-10;

/// Failure policy of the linear-algebra services
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LinalgOptions {
    /// Return [`Error::Singular`] instead of an empty matrix
    pub strict: bool,
}

impl LinalgOptions {
    /// Options that turn numerical failures into errors
    pub const fn strict() -> Self {
        Self { strict: true }
    }

    fn fail<T: Element>(self, op: &'static str) -> Result<Matrix<T>> {
        debug!(op, strict = self.strict, "linear algebra failure");
        if self.strict {
            Err(Error::Singular { op })
        } else {
            Ok(Matrix::empty())
        }
    }
}

/// `P·L·U = A` with `P` a permutation, `L` unit lower and `U` upper
/// trapezoidal
#[derive(Clone, Debug, PartialEq)]
pub struct Plu<M> {
    /// `m x m` permutation
    pub p: M,
    /// `m x min(m, n)` unit lower triangular
    pub l: M,
    /// `min(m, n) x n` upper triangular
    pub u: M,
    /// False if a zero pivot was met
    pub non_singular: bool,
}

/// Thin singular value decomposition `A = U·Σ·Vᴴ`
#[derive(Clone, Debug, PartialEq)]
pub struct Svd<M> {
    /// `m x k` with orthonormal columns, `k = min(m, n)`
    pub u: M,
    /// `k x k` diagonal, non-negative and descending
    pub s: M,
    /// `k x n` with orthonormal rows
    pub vh: M,
    /// False if the Jacobi sweeps did not converge
    pub ok: bool,
}

/// `A = Q·R`
#[derive(Clone, Debug, PartialEq)]
pub struct Qr<M> {
    /// `m x m` unitary
    pub q: M,
    /// `m x n` upper triangular
    pub r: M,
    /// False if the factors are not finite
    pub ok: bool,
}

/// `A = L·Q`
#[derive(Clone, Debug, PartialEq)]
pub struct Lq<M> {
    /// `m x n` lower triangular
    pub l: M,
    /// `n x n` unitary
    pub q: M,
    /// False if the factors are not finite
    pub ok: bool,
}

/// `A = Q·H·Qᴴ` with `H` upper Hessenberg
#[derive(Clone, Debug, PartialEq)]
pub struct Hessenberg<M> {
    /// Unitary factor
    pub q: M,
    /// Upper Hessenberg factor
    pub h: M,
}

/// Complex Schur form `A = Q·T·Qᴴ`
#[derive(Clone, Debug, PartialEq)]
pub struct Schur {
    /// Unitary factor
    pub q: MatrixComplex,
    /// Upper triangular factor
    pub t: MatrixComplex,
    /// Diagonal of `T` as a column vector
    pub eigenvalues: MatrixComplex,
    /// False if the QR iteration did not converge
    pub ok: bool,
}

/// Schur form plus unit-norm right eigenvectors
#[derive(Clone, Debug, PartialEq)]
pub struct Eigen {
    /// Unitary Schur factor
    pub q: MatrixComplex,
    /// Upper triangular Schur factor
    pub t: MatrixComplex,
    /// Eigenvalues as a column vector
    pub eigenvalues: MatrixComplex,
    /// One eigenvector per column, in the order of `eigenvalues`
    pub vectors: MatrixComplex,
    /// False if the QR iteration did not converge
    pub ok: bool,
}

/// Diagonal scalings with `R·A·C` equilibrated
#[derive(Clone, Debug, PartialEq)]
pub struct Equilibration {
    /// `m x m` diagonal row scaling
    pub r: MatrixReal,
    /// `n x n` diagonal column scaling
    pub c: MatrixReal,
    /// False if `A` has a zero row or column
    pub ok: bool,
}

impl<M> Plu<M> {
    /// Apply `f` to every factor
    pub fn map<N>(self, mut f: impl FnMut(M) -> N) -> Plu<N> {
        Plu {
            p: f(self.p),
            l: f(self.l),
            u: f(self.u),
            non_singular: self.non_singular,
        }
    }
}

impl<M> Svd<M> {
    /// Apply `f` to every factor
    pub fn map<N>(self, mut f: impl FnMut(M) -> N) -> Svd<N> {
        Svd {
            u: f(self.u),
            s: f(self.s),
            vh: f(self.vh),
            ok: self.ok,
        }
    }
}

impl<M> Qr<M> {
    /// Apply `f` to every factor
    pub fn map<N>(self, mut f: impl FnMut(M) -> N) -> Qr<N> {
        Qr {
            q: f(self.q),
            r: f(self.r),
            ok: self.ok,
        }
    }
}

impl<M> Lq<M> {
    /// Apply `f` to every factor
    pub fn map<N>(self, mut f: impl FnMut(M) -> N) -> Lq<N> {
        Lq {
            l: f(self.l),
            q: f(self.q),
            ok: self.ok,
        }
    }
}

impl<M> Hessenberg<M> {
    /// Apply `f` to every factor
    pub fn map<N>(self, mut f: impl FnMut(M) -> N) -> Hessenberg<N> {
        Hessenberg {
            q: f(self.q),
            h: f(self.h),
        }
    }
}

impl<T: Element> Matrix<T> {
    /// Entry-wise `p`-norm, `(Σ |a_ij|^p)^(1/p)`
    ///
    /// `p = ∞` gives the largest magnitude. `p` must be positive.
    pub fn p_norm(&self, p: f64) -> Result<f64> {
        if p.is_nan() || p <= 0.0 {
            return Err(Error::invalid_parameter(
                "p",
                format!("norm order must be positive, got {p}"),
            ));
        }
        let magnitudes: Vec<f64> = self
            .to_column_major_vec()?
            .into_iter()
            .map(Element::magnitude)
            .collect();
        Ok(entrywise_norm(&magnitudes, p))
    }

    /// Entry-wise 2-norm; the Euclidean length for vectors
    pub fn euclidean_norm(&self) -> Result<f64> {
        self.p_norm(2.0)
    }
}

/// Scaled by the largest magnitude so that `|x|^p` cannot overflow
fn entrywise_norm(magnitudes: &[f64], p: f64) -> f64 {
    if magnitudes.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let max = magnitudes.iter().copied().fold(0.0, f64::max);
    if p.is_infinite() || max == 0.0 || max.is_infinite() {
        return max;
    }
    let sum: f64 = magnitudes.iter().map(|v| (v / max).powf(p)).sum();
    max * sum.powf(1.0 / p)
}

impl<T: LinalgElement> Matrix<T> {
    fn require_square(&self, op: &'static str) -> Result<usize> {
        let (rows, cols) = self.shape();
        if rows != cols {
            return Err(Error::invalid_parameter(
                "matrix",
                format!("{op} requires a square matrix, got {rows}x{cols}"),
            ));
        }
        Ok(rows)
    }

    /// Determinant from an LU factorisation; one for the empty matrix
    pub fn determinant(&self) -> Result<T> {
        let n = self.require_square("determinant")?;
        let mut a = self.to_column_major_vec()?;
        let mut ipiv = vec![0; n];
        BACKEND.getrf(n, n, &mut a, &mut ipiv);
        let mut det = T::one();
        for (i, &p) in ipiv.iter().enumerate() {
            det = det * a[i * n + i];
            if p != i {
                det = -det;
            }
        }
        Ok(det)
    }

    /// Inverse; empty if the matrix is singular
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(LinalgOptions::default())
    }

    /// Inverse with an explicit failure policy
    pub fn inverse_with(&self, options: LinalgOptions) -> Result<Self> {
        let n = self.require_square("inverse")?;
        let mut lu = self.to_column_major_vec()?;
        let mut ipiv = vec![0; n];
        if !BACKEND.getrf(n, n, &mut lu, &mut ipiv).is_ok() {
            return options.fail("inverse");
        }
        let mut b = Self::identity(n)?.to_column_major_vec()?;
        if !BACKEND.getrs(n, n, &lu, &ipiv, &mut b).is_ok() {
            return options.fail("inverse");
        }
        Self::from_column_major_vec(n, n, b)
    }

    /// LU factorisation with partial pivoting
    pub fn plu(&self) -> Result<Plu<Self>> {
        let (m, n) = self.shape();
        let k = m.min(n);
        let mut a = self.to_column_major_vec()?;
        let mut ipiv = vec![0; k];
        let status = BACKEND.getrf(m, n, &mut a, &mut ipiv);

        // Row i of the factored matrix is row perm[i] of A
        let mut perm: Vec<usize> = (0..m).collect();
        for (i, &p) in ipiv.iter().enumerate() {
            perm.swap(i, p);
        }
        let mut p = vec![T::zero(); m * m];
        for (i, &row) in perm.iter().enumerate() {
            p[i * m + row] = T::one();
        }

        let mut l = vec![T::zero(); m * k];
        for j in 0..k {
            l[j * m + j] = T::one();
            for i in (j + 1)..m {
                l[j * m + i] = a[j * m + i];
            }
        }
        let mut u = vec![T::zero(); k * n];
        for j in 0..n {
            for i in 0..k.min(j + 1) {
                u[j * k + i] = a[j * m + i];
            }
        }

        Ok(Plu {
            p: Self::from_column_major_vec(m, m, p)?,
            l: Self::from_column_major_vec(m, k, l)?,
            u: Self::from_column_major_vec(k, n, u)?,
            non_singular: status.is_ok(),
        })
    }

    /// Thin singular value decomposition
    pub fn svd(&self) -> Result<Svd<Self>> {
        let (m, n) = self.shape();
        let k = m.min(n);
        let a = self.to_column_major_vec()?;
        let factors = BACKEND.gesdd(m, n, &a);
        let sigma: Vec<T> = factors.s.iter().map(|&s| T::from_real(s)).collect();
        Ok(Svd {
            u: Self::from_column_major_vec(m, k, factors.u)?,
            s: Self::diagonal(&sigma)?,
            vh: Self::from_column_major_vec(k, n, factors.vt)?,
            ok: factors.status.is_ok(),
        })
    }

    /// Householder QR factorisation
    pub fn qr(&self) -> Result<Qr<Self>> {
        let (m, n) = self.shape();
        let a = self.to_column_major_vec()?;
        let QrFactors { q, r } = BACKEND.geqrf(m, n, &a);
        let ok = all_finite(&q) && all_finite(&r);
        Ok(Qr {
            q: Self::from_column_major_vec(m, m, q)?,
            r: Self::from_column_major_vec(m, n, r)?,
            ok,
        })
    }

    /// LQ factorisation
    pub fn lq(&self) -> Result<Lq<Self>> {
        let (m, n) = self.shape();
        let a = self.to_column_major_vec()?;
        let LqFactors { l, q } = BACKEND.gelqf(m, n, &a);
        let ok = all_finite(&l) && all_finite(&q);
        Ok(Lq {
            l: Self::from_column_major_vec(m, n, l)?,
            q: Self::from_column_major_vec(n, n, q)?,
            ok,
        })
    }

    /// Lower Cholesky factor `L` with `A = L·Lᴴ`; empty unless `A` is
    /// Hermitian positive definite
    pub fn cholesky(&self) -> Result<Self> {
        self.cholesky_with(LinalgOptions::default())
    }

    /// Lower Cholesky factor with an explicit failure policy
    pub fn cholesky_with(&self, options: LinalgOptions) -> Result<Self> {
        let n = self.require_square("cholesky")?;
        let mut a = self.to_column_major_vec()?;
        if !is_hermitian(n, &a) {
            return options.fail("cholesky");
        }
        if !BACKEND.potrf(n, &mut a).is_ok() {
            return options.fail("cholesky");
        }
        Self::from_column_major_vec(n, n, a)
    }

    /// Upper Cholesky factor `U = Lᴴ` with `A = Uᴴ·U`
    pub fn upper_cholesky(&self) -> Result<Self> {
        self.upper_cholesky_with(LinalgOptions::default())
    }

    /// Upper Cholesky factor with an explicit failure policy
    pub fn upper_cholesky_with(&self, options: LinalgOptions) -> Result<Self> {
        self.cholesky_with(options)?.adjoint()
    }

    /// Householder reduction to upper Hessenberg form
    pub fn hessenberg(&self) -> Result<Hessenberg<Self>> {
        let n = self.require_square("hessenberg")?;
        let a = self.to_column_major_vec()?;
        let HessenbergFactors { q, h } = BACKEND.gehrd(n, &a);
        Ok(Hessenberg {
            q: Self::from_column_major_vec(n, n, q)?,
            h: Self::from_column_major_vec(n, n, h)?,
        })
    }

    /// Complex Schur decomposition
    pub fn schur(&self) -> Result<Schur> {
        let n = self.require_square("schur")?;
        let a = self.to_column_major_vec()?;
        let factors = BACKEND.gees(n, &a);
        schur_matrices(n, factors)
    }

    /// Eigenvalues and unit-norm right eigenvectors
    pub fn eigenvectors(&self) -> Result<Eigen> {
        let n = self.require_square("eigenvectors")?;
        let a = self.to_column_major_vec()?;
        let EigenFactors { schur, vectors } = BACKEND.geev(n, &a);
        let Schur {
            q,
            t,
            eigenvalues,
            ok,
        } = schur_matrices(n, schur)?;
        Ok(Eigen {
            q,
            t,
            eigenvalues,
            vectors: MatrixComplex::from_column_major_vec(n, n, vectors)?,
            ok,
        })
    }

    /// Number of singular values above `epsilon · σ_max`
    pub fn rank(&self, epsilon: f64) -> Result<usize> {
        if epsilon.is_nan() || epsilon < 0.0 {
            return Err(Error::invalid_parameter(
                "epsilon",
                format!("rank tolerance must be non-negative, got {epsilon}"),
            ));
        }
        let (m, n) = self.shape();
        let a = self.to_column_major_vec()?;
        let s = BACKEND.gesdd(m, n, &a).s;
        let threshold = s.first().copied().unwrap_or(0.0) * epsilon;
        Ok(s.iter().filter(|&&v| v > threshold && v > 0.0).count())
    }

    /// Two-norm condition number `σ_max / σ_min`
    pub fn condition_number(&self) -> Result<f64> {
        let (m, n) = self.shape();
        let a = self.to_column_major_vec()?;
        Ok(BACKEND.condition_number(m, n, &a))
    }

    /// Maximum absolute column sum
    pub fn one_norm(&self) -> Result<f64> {
        let (m, n) = self.shape();
        let a = self.to_column_major_vec()?;
        Ok(BACKEND.one_norm(m, n, &a))
    }

    /// Maximum absolute row sum
    pub fn infinity_norm(&self) -> Result<f64> {
        let (m, n) = self.shape();
        let a = self.to_column_major_vec()?;
        Ok(BACKEND.infinity_norm(m, n, &a))
    }

    /// Row and column scalings that equilibrate the matrix
    pub fn equilibrate(&self) -> Result<Equilibration> {
        let (m, n) = self.shape();
        let a = self.to_column_major_vec()?;
        let EquilibrationFactors { r, c, status } = BACKEND.equilibrate(m, n, &a);
        Ok(Equilibration {
            r: MatrixReal::diagonal(&r)?,
            c: MatrixReal::diagonal(&c)?,
            ok: status.is_ok(),
        })
    }

    /// Solve `A·X = Y`; empty if `A` is singular
    pub fn solve(&self, y: &Self) -> Result<Self> {
        self.solve_with(y, LinalgOptions::default())
    }

    /// Solve `A·X = Y` with an explicit failure policy
    pub fn solve_with(&self, y: &Self, options: LinalgOptions) -> Result<Self> {
        let n = self.require_square("solve")?;
        if y.rows() != n {
            return Err(Error::shape_mismatch("solve", (n, n), y.shape()));
        }
        let nrhs = y.cols();
        let mut lu = self.to_column_major_vec()?;
        let mut ipiv = vec![0; n];
        if !BACKEND.getrf(n, n, &mut lu, &mut ipiv).is_ok() {
            return options.fail("solve");
        }
        let mut b = y.to_column_major_vec()?;
        if !BACKEND.getrs(n, nrhs, &lu, &ipiv, &mut b).is_ok() {
            return options.fail("solve");
        }
        Self::from_column_major_vec(n, nrhs, b)
    }

    /// Least-squares solution of `A·X ≈ B`
    ///
    /// Overdetermined systems (`m ≥ n`) minimise `‖A·X − B‖` through a QR
    /// factorisation; underdetermined ones return the minimum-norm solution
    /// through an LQ factorisation. Empty if `A` is rank deficient.
    pub fn least_squares(&self, b: &Self) -> Result<Self> {
        self.least_squares_with(b, LinalgOptions::default())
    }

    /// Least-squares solution with an explicit failure policy
    pub fn least_squares_with(&self, b: &Self, options: LinalgOptions) -> Result<Self> {
        let (m, n) = self.shape();
        if b.rows() != m {
            return Err(Error::shape_mismatch("least_squares", (m, n), b.shape()));
        }
        if m == 0 || n == 0 {
            return options.fail("least_squares");
        }
        let nrhs = b.cols();
        let a = self.to_column_major_vec()?;
        let rhs = b.to_column_major_vec()?;

        if m >= n {
            let QrFactors { q, r } = BACKEND.geqrf(m, n, &a);
            if rank_deficient((0..n).map(|i| r[i * m + i]), m.max(n)) {
                return options.fail("least_squares");
            }
            // X = R₁⁻¹·(Qᴴ·B)[0..n]
            let mut x = vec![T::zero(); n * nrhs];
            for c in 0..nrhs {
                let column = &rhs[c * m..(c + 1) * m];
                for i in 0..n {
                    let qi = &q[i * m..(i + 1) * m];
                    x[c * n + i] = qi
                        .iter()
                        .zip(column)
                        .fold(T::zero(), |acc, (&qv, &bv)| acc + qv.conj() * bv);
                }
                for i in (0..n).rev() {
                    let mut sum = x[c * n + i];
                    for j in (i + 1)..n {
                        sum = sum - r[j * m + i] * x[c * n + j];
                    }
                    x[c * n + i] = sum / r[i * m + i];
                }
            }
            Self::from_column_major_vec(n, nrhs, x)
        } else {
            let LqFactors { l, q } = BACKEND.gelqf(m, n, &a);
            if rank_deficient((0..m).map(|i| l[i * m + i]), m.max(n)) {
                return options.fail("least_squares");
            }
            // X = Q₁ᴴ·(L₁⁻¹·B) with Q₁ the leading m rows of Q
            let mut x = vec![T::zero(); n * nrhs];
            let mut y = vec![T::zero(); m];
            for c in 0..nrhs {
                for i in 0..m {
                    let mut sum = rhs[c * m + i];
                    for (j, &yj) in y.iter().enumerate().take(i) {
                        sum = sum - l[j * m + i] * yj;
                    }
                    y[i] = sum / l[i * m + i];
                }
                for j in 0..n {
                    x[c * n + j] = y
                        .iter()
                        .enumerate()
                        .fold(T::zero(), |acc, (i, &yi)| acc + q[j * n + i].conj() * yi);
                }
            }
            Self::from_column_major_vec(n, nrhs, x)
        }
    }

    /// Forward DFT of a vector, or of every column of a matrix
    pub fn dft(&self) -> Result<MatrixComplex> {
        self.transform_complex(|x| BACKEND.dft(x))
    }

    /// Inverse DFT (scaled by `1/n`) of a vector, or of every column
    pub fn idft(&self) -> Result<MatrixComplex> {
        self.transform_complex(|x| BACKEND.idft(x))
    }

    /// Analytic signal `x + i·H(x)` of a vector
    pub fn hilbert_transform(&self) -> Result<MatrixComplex> {
        let (rows, cols) = self.shape();
        if rows != 1 && cols != 1 && !self.is_empty() {
            return Err(Error::invalid_parameter(
                "matrix",
                format!("hilbert transform requires a vector, got {rows}x{cols}"),
            ));
        }
        let x: Vec<Complex> = self
            .to_column_major_vec()?
            .into_iter()
            .map(Element::to_complex)
            .collect();
        let n = x.len();
        let half = n.div_ceil(2);
        let spectrum: Vec<Complex> = BACKEND
            .dft(&x)
            .into_iter()
            .enumerate()
            .map(|(k, v)| {
                if k == 0 || (n % 2 == 0 && k == n / 2) {
                    v
                } else if k < half {
                    v.scale(2.0)
                } else {
                    Complex::ZERO
                }
            })
            .collect();
        MatrixComplex::from_column_major_vec(rows, cols, BACKEND.idft(&spectrum))
    }

    fn transform_complex(
        &self,
        f: impl Fn(&[Complex]) -> Vec<Complex>,
    ) -> Result<MatrixComplex> {
        let (rows, cols) = self.shape();
        let x: Vec<Complex> = self
            .to_column_major_vec()?
            .into_iter()
            .map(Element::to_complex)
            .collect();
        let out = if rows == 1 || cols == 1 {
            f(&x)
        } else {
            x.chunks(rows.max(1)).flat_map(&f).collect()
        };
        MatrixComplex::from_column_major_vec(rows, cols, out)
    }
}

impl MatrixReal {
    /// Orthonormal DCT-II of a vector, or of every column of a matrix
    pub fn dct(&self) -> Result<Self> {
        self.transform_real(|x| BACKEND.dct(x))
    }

    /// Orthonormal DCT-III, the inverse of [`MatrixReal::dct`]
    pub fn idct(&self) -> Result<Self> {
        self.transform_real(|x| BACKEND.idct(x))
    }

    fn transform_real(&self, f: impl Fn(&[f64]) -> Vec<f64>) -> Result<Self> {
        let (rows, cols) = self.shape();
        let x = self.to_column_major_vec()?;
        let out = if rows == 1 || cols == 1 {
            f(&x)
        } else {
            x.chunks(rows.max(1)).flat_map(&f).collect()
        };
        Self::from_column_major_vec(rows, cols, out)
    }
}

fn schur_matrices(n: usize, factors: SchurFactors) -> Result<Schur> {
    let SchurFactors {
        q,
        t,
        eigenvalues,
        status,
    } = factors;
    Ok(Schur {
        q: MatrixComplex::from_column_major_vec(n, n, q)?,
        t: MatrixComplex::from_column_major_vec(n, n, t)?,
        eigenvalues: MatrixComplex::from_column_major_vec(n, 1, eigenvalues)?,
        ok: status.is_ok(),
    })
}

fn all_finite<T: Element>(values: &[T]) -> bool {
    values.iter().all(|v| v.to_complex().is_finite())
}

/// `a(i, j) == conj(a(j, i))` relative to the largest magnitude
fn is_hermitian<T: LinalgElement>(n: usize, a: &[T]) -> bool {
    let max = a.iter().map(|v| v.abs_val()).fold(0.0, f64::max);
    let tol = HERMITIAN_TOLERANCE * max;
    (0..n).all(|j| (j..n).all(|i| (a[j * n + i] - a[i * n + j].conj()).abs_val() <= tol))
}

/// A triangular diagonal is rank deficient when an entry falls below
/// `size · ε · max|d|`
fn rank_deficient<T: LinalgElement>(diagonal: impl Iterator<Item = T>, size: usize) -> bool {
    let magnitudes: Vec<f64> = diagonal.map(LinalgElement::abs_val).collect();
    let max = magnitudes.iter().copied().fold(0.0, f64::max);
    let tol = size as f64 * T::epsilon_val() * max;
    max == 0.0 || magnitudes.iter().any(|&d| d <= tol || d.is_nan())
}
