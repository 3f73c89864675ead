//! CPU implementation of the dense linear algebra kernels
//!
//! - [`blas`]: products, `axpy`, `scal`
//! - [`decompositions`]: LU, Cholesky, QR, LQ, Hessenberg
//! - [`svd`]: one-sided Jacobi SVD
//! - [`schur`]: complex Schur form and eigenvectors
//! - [`norms`]: operator norms, condition number, equilibration

pub mod blas;
pub mod decompositions;
pub mod norms;
pub mod schur;
pub mod svd;

pub use blas::matmul_kernel;
