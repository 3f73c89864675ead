//! Free-function façade
//!
//! One function per mathematical operation, accepting any scalar, matrix or
//! [`Variant`](crate::variant::Variant) argument through
//! `impl Into<Variant>`.
//!
//! # Dispatch
//!
//! ```text
//! f(a, b)
//!   ├── tag of a, tag of b      (Set, Tuple, None → InvalidParameterValue)
//!   ├── join of their domains   (Complex ≻ Real ≻ Integer ≻ Boolean)
//!   ├── promote both operands
//!   └── typed Matrix<T> method  → Variant of the join domain
//! ```
//!
//! Linear-algebra functions raise boolean and integer arguments to the real
//! domain. Norms and condition numbers return `f64`; [`determinant`]
//! returns [`Complex`](crate::dtype::Complex) for every argument.

pub mod arithmetic;
pub mod construct;
pub(crate) mod dispatch;
pub mod linalg;
pub mod shape;

pub use arithmetic::{add, divide, hadamard, kronecker, multiply, negate, subtract, trace};
pub use construct::*;
pub use linalg::{
    cholesky, condition_number, dct, determinant, dft, eigenvectors, equilibrate, euclidean_norm,
    hessenberg, hilbert_transform, idct, idft, infinity_norm, inverse, inverse_with, least_squares,
    least_squares_with, lq, one_norm, p_norm, plu, qr, rank, schur, solve, solve_with, svd,
    upper_cholesky,
};
pub use shape::{
    adjoint, column_reverse, combine_left_to_right, combine_top_to_bottom, conj, is_hermitian,
    is_normal, is_skew_hermitian, is_skew_symmetric, is_symmetric, row_reverse, shape, transpose,
};
