//! # numval
//!
//! **Copy-on-write matrix values over the boolean, integer, real and complex
//! domains.**
//!
//! numval is the value layer of a numeric runtime: matrices that are cheap
//! to copy and transpose, a tagged [`Variant`](variant::Variant) that any
//! scalar, integer collection or matrix converts into, free functions that
//! promote mixed arguments to a common domain, and a series summation
//! engine with Shanks acceleration.
//!
//! ## Features
//!
//! - **Matrices**: dense or sparse storage chosen from density, shared
//!   between handles until written, one-based indexing
//! - **Lazy transforms**: O(1) transpose and deferred scalar multiplication
//! - **Linear algebra**: PLU, QR, LQ, SVD, Cholesky, Hessenberg, Schur,
//!   eigenvectors, solves, norms, DFT and DCT through a pluggable
//!   [`LinAlg`](runtime::LinAlg) back-end
//! - **Summation**: finite and infinite series of scalars or matrices
//! - **Persistence**: a checksummed binary matrix format
//!
//! ## Quick Start
//!
//! ```rust
//! use numval::prelude::*;
//!
//! let a = MatrixInteger::from_rows(&[[1, 2], [3, 4]])?;
//! let b = MatrixComplex::from_rows(&[[Complex::I, Complex::ZERO], [Complex::ZERO, Complex::ONE]])?;
//!
//! // Integer + Complex promotes to Complex
//! let c = ops::add(&a, &b)?;
//! assert_eq!(c.value_type(), ValueType::MatrixComplex);
//!
//! // Transposition shares the coefficients
//! let t = a.transpose();
//! assert_eq!(t.at(1, 2)?, 3);
//! # Ok::<(), numval::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): multi-threaded matrix product and element-wise maps
//!   on large matrices

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod algorithm;
pub mod collections;
pub mod dtype;
pub mod error;
pub mod io;
pub mod matrix;
pub mod ops;
pub mod runtime;
pub mod storage;
pub mod variant;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::summation::{SumBound, SummationOptions, sum, sum_with};
    pub use crate::collections::{Range, Set, Tuple};
    pub use crate::dtype::{Complex, DType, Element};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::matrix::{
        LinalgOptions, Matrix, MatrixBoolean, MatrixComplex, MatrixInteger, MatrixReal,
    };
    pub use crate::ops;
    pub use crate::runtime::{CpuLinAlg, LinAlg, Prng};
    pub use crate::variant::{ValueType, Variant};
}
