//! Numerical algorithms built on top of the matrix domains
//!
//! - [`summation`] - infinite and finite series with Shanks acceleration
//!
//! Dense linear algebra kernels live behind the
//! [`LinAlg`](crate::runtime::LinAlg) back-end instead.

pub mod summation;
