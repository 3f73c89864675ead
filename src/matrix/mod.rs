//! Matrix containers over the four scalar domains
//!
//! A [`Matrix`] is a small handle: a shared [`Storage`] plus a pending
//! transpose flag and a pending scalar multiplier. The logical value seen by
//! callers is
//!
//! ```text
//! scale · (transposed ? transpose(storage) : storage)
//! ```
//!
//! Cloning a matrix clones the handle only; the coefficients are shared until
//! one of the handles is mutated (copy-on-write). Transposition is O(1) and
//! real/complex scalar multiplication is deferred until an operation needs
//! physical coefficients.
//!
//! Indices are one-based throughout the public API.

mod arith;
mod combine;
mod convert;
mod core;
mod index;
mod iter;
mod linalg;
mod order;
mod predicates;
mod random;

pub use iter::MatrixIterator;
pub use linalg::{Eigen, Equilibration, Hessenberg, LinalgOptions, Lq, Plu, Qr, Schur, Svd};

use crate::dtype::{Complex, Element};
use crate::storage::Storage;

/// Matrix with coefficients of type `T`
///
/// See the [module documentation](self) for the sharing and laziness model.
#[derive(Clone)]
pub struct Matrix<T: Element> {
    storage: Storage<T>,
    transposed: bool,
    scale: T,
}

/// Matrix of booleans
pub type MatrixBoolean = Matrix<bool>;

/// Matrix of 64-bit signed integers
pub type MatrixInteger = Matrix<i64>;

/// Matrix of IEEE-754 binary64 reals
pub type MatrixReal = Matrix<f64>;

/// Matrix of complex numbers
pub type MatrixComplex = Matrix<Complex>;

/// Element-count threshold above which element-wise kernels run on rayon
#[cfg(feature = "rayon")]
pub(crate) const PARALLEL_THRESHOLD: usize = 1 << 15;
