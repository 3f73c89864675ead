//! CPU back-end
//!
//! [`CpuLinAlg`] is the reference implementation of [`LinAlg`] written in
//! plain Rust. With the `rayon` feature the matrix product splits wide
//! outputs across the rayon thread pool; every other kernel is sequential.

pub mod fft;
pub mod jacobi;
pub mod linalg;

use self::jacobi::LinalgElement;
use self::linalg::{blas, decompositions, norms, schur, svd};
use super::{
    EigenFactors, EquilibrationFactors, HessenbergFactors, LinAlg, LqFactors, QrFactors,
    SchurFactors, Status, SvdFactors,
};
use crate::dtype::Complex;

/// Pure-Rust dense linear algebra
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CpuLinAlg;

impl LinAlg for CpuLinAlg {
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
    ) {
        blas::gemm(m, n, k, alpha, a, b, beta, c);
    }

    fn gemv<T: LinalgElement>(
        &self,
        m: usize,
        n: usize,
        alpha: T,
        a: &[T],
        x: &[T],
        beta: T,
        y: &mut [T],
    ) {
        blas::gemv(m, n, alpha, a, x, beta, y);
    }

    fn axpy<T: LinalgElement>(&self, alpha: T, x: &[T], y: &mut [T]) {
        blas::axpy(alpha, x, y);
    }

    fn scal<T: LinalgElement>(&self, alpha: T, x: &mut [T]) {
        blas::scal(alpha, x);
    }

    fn getrf<T: LinalgElement>(
        &self,
        m: usize,
        n: usize,
        a: &mut [T],
        ipiv: &mut [usize],
    ) -> Status {
        decompositions::getrf(m, n, a, ipiv)
    }

    fn getrs<T: LinalgElement>(
        &self,
        n: usize,
        nrhs: usize,
        lu: &[T],
        ipiv: &[usize],
        b: &mut [T],
    ) -> Status {
        decompositions::getrs(n, nrhs, lu, ipiv, b)
    }

    fn geqrf<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> QrFactors<T> {
        decompositions::geqrf(m, n, a)
    }

    fn gelqf<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> LqFactors<T> {
        decompositions::gelqf(m, n, a)
    }

    fn potrf<T: LinalgElement>(&self, n: usize, a: &mut [T]) -> Status {
        decompositions::potrf(n, a)
    }

    fn gesdd<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> SvdFactors<T> {
        svd::gesdd(m, n, a)
    }

    fn gehrd<T: LinalgElement>(&self, n: usize, a: &[T]) -> HessenbergFactors<T> {
        decompositions::gehrd(n, a)
    }

    fn gees<T: LinalgElement>(&self, n: usize, a: &[T]) -> SchurFactors {
        schur::gees(n, a)
    }

    fn geev<T: LinalgElement>(&self, n: usize, a: &[T]) -> EigenFactors {
        schur::geev(n, a)
    }

    fn one_norm<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> f64 {
        norms::one_norm(m, n, a)
    }

    fn infinity_norm<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> f64 {
        norms::infinity_norm(m, n, a)
    }

    fn condition_number<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> f64 {
        norms::condition_number(m, n, a)
    }

    fn equilibrate<T: LinalgElement>(&self, m: usize, n: usize, a: &[T]) -> EquilibrationFactors {
        norms::equilibrate(m, n, a)
    }

    fn dft(&self, x: &[Complex]) -> Vec<Complex> {
        fft::dft(x)
    }

    fn idft(&self, x: &[Complex]) -> Vec<Complex> {
        fft::idft(x)
    }

    fn dct(&self, x: &[f64]) -> Vec<f64> {
        fft::dct(x)
    }

    fn idct(&self, x: &[f64]) -> Vec<f64> {
        fft::idct(x)
    }
}
