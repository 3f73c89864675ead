//! Common test utilities
#![allow(dead_code)]

use numval::dtype::Complex;
use numval::matrix::{MatrixComplex, MatrixReal};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Deterministic random source for reproducible inputs
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two complex slices are close within tolerance
pub fn assert_allclose_complex(a: &[Complex], b: &[Complex], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (*x - *y).magnitude();
        let tol = atol + rtol * y.magnitude();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two real matrices have equal shape and close coefficients
pub fn assert_matrix_close(a: &MatrixReal, b: &MatrixReal, tol: f64, msg: &str) {
    assert_eq!(a.shape(), b.shape(), "{}: shape mismatch", msg);
    assert_allclose_f64(
        &a.to_column_major_vec().unwrap(),
        &b.to_column_major_vec().unwrap(),
        0.0,
        tol,
        msg,
    );
}

/// Assert two complex matrices have equal shape and close coefficients
pub fn assert_complex_matrix_close(a: &MatrixComplex, b: &MatrixComplex, tol: f64, msg: &str) {
    assert_eq!(a.shape(), b.shape(), "{}: shape mismatch", msg);
    assert_allclose_complex(
        &a.to_column_major_vec().unwrap(),
        &b.to_column_major_vec().unwrap(),
        0.0,
        tol,
        msg,
    );
}
