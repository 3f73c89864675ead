//! End-to-end scenarios across the public surface
//!
//! Tests verify:
//! - Variant implicit ordering across every tag group
//! - Cross-domain promotion in the free functions
//! - Lazy transpose and copy-on-write sharing
//! - Finite and accelerated infinite summation
//! - Boundary behaviour of empty matrices and indexers

use numval::algorithm::summation::{SumBound, SummationOptions, sum, sum_with};
use numval::collections::{Set, Tuple};
use numval::dtype::Complex;
use numval::error::ErrorKind;
use numval::matrix::{MatrixBoolean, MatrixComplex, MatrixInteger, MatrixReal};
use numval::ops;
use numval::variant::{ValueType, Variant, implicit_ordering};
use std::cmp::Ordering;

fn c(re: f64, im: f64) -> Complex {
    Complex::new(re, im)
}

// ============================================================================
// Variant ordering
// ============================================================================

#[test]
fn test_variant_implicit_ordering_chain() {
    let values: Vec<Variant> = vec![
        false.into(),
        true.into(),
        Complex::from(23.0).into(),
        24.0.into(),
        25i64.into(),
        c(23.0, 22.0).into(),
        Complex::from(123.0).into(),
        c(123.0, 122.0).into(),
        Set::from([20, 21]).into(),
        Set::from([120, 121]).into(),
        Tuple::from([18, 19]).into(),
        Tuple::from([118, 119]).into(),
        MatrixBoolean::from_rows(&[[true, false], [false, true]])
            .unwrap()
            .into(),
        MatrixBoolean::from_rows(&[[true, true], [true, true]])
            .unwrap()
            .into(),
        MatrixInteger::from_rows(&[[17, 16], [15, 14]]).unwrap().into(),
        MatrixInteger::from_rows(&[[117, 116], [115, 114]])
            .unwrap()
            .into(),
        MatrixReal::from_rows(&[[13.0, 12.0], [11.0, 10.0]])
            .unwrap()
            .into(),
        MatrixReal::from_rows(&[[113.0, 112.0], [111.0, 110.0]])
            .unwrap()
            .into(),
        MatrixComplex::from_rows(&[[c(9.0, 8.0), c(7.0, 6.0)], [c(5.0, 4.0), c(3.0, 2.0)]])
            .unwrap()
            .into(),
        MatrixComplex::from_rows(&[
            [c(19.0, 18.0), c(17.0, 16.0)],
            [c(15.0, 14.0), c(13.0, 12.0)],
        ])
        .unwrap()
        .into(),
    ];

    for pair in values.windows(2) {
        assert_eq!(
            implicit_ordering(&pair[0], &pair[1]),
            Ordering::Less,
            "{} should order before {}",
            pair[0],
            pair[1]
        );
        assert_eq!(implicit_ordering(&pair[1], &pair[0]), Ordering::Greater);
    }
    for v in &values {
        assert_eq!(implicit_ordering(v, v), Ordering::Equal);
    }
}

// ============================================================================
// Promotion through the free functions
// ============================================================================

#[test]
fn test_hadamard_of_boolean_matrices() {
    let a = MatrixBoolean::from_rows(&[[true, false], [false, true]]).unwrap();
    let b = MatrixBoolean::from_rows(&[[true, true], [false, true]]).unwrap();
    let h = ops::hadamard(&a, &b).unwrap();
    assert_eq!(h.value_type(), ValueType::MatrixBoolean);
    assert_eq!(h.to_matrix_boolean(), a);
}

#[test]
fn test_combine_left_to_right() {
    let a = MatrixReal::from_rows(&[[1.0, 2.0]]).unwrap();
    let b = MatrixReal::from_rows(&[[3.0, 4.0]]).unwrap();
    let m = ops::combine_left_to_right(&a, &b).unwrap().to_matrix_real();
    assert_eq!(m, MatrixReal::from_rows(&[[1.0, 2.0, 3.0, 4.0]]).unwrap());
}

#[test]
fn test_mixed_domain_arithmetic() {
    let i = MatrixInteger::from_rows(&[[1, 2], [3, 4]]).unwrap();
    let r = MatrixReal::from_rows(&[[0.5, 0.5], [0.5, 0.5]]).unwrap();
    let sum = ops::add(&i, &r).unwrap();
    assert_eq!(sum.value_type(), ValueType::MatrixReal);
    assert_eq!(sum.to_matrix_real().at(2, 2).unwrap(), 4.5);

    let product = ops::multiply(Complex::I, &i).unwrap().to_matrix_complex();
    assert_eq!(product.at(2, 1).unwrap(), c(0.0, 3.0));

    let err = ops::add(&i, Set::from([1, 2])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameterValue);
}

// ============================================================================
// Sharing and laziness
// ============================================================================

#[test]
fn test_transpose_of_large_matrix_shares_storage() {
    let a = MatrixReal::from_fn(1000, 1000, |r, c| (r * 1000 + c) as f64).unwrap();
    let b = ops::transpose(&a).unwrap().to_matrix_real();
    assert_eq!(b.at(1, 1).unwrap(), a.at(1, 1).unwrap());
    assert_eq!(b.at(1, 2).unwrap(), a.at(2, 1).unwrap());
    assert!(b.is_transposed());
    assert!(b.shares_storage_with(&a));
}

#[test]
fn test_copy_on_write() {
    let a = MatrixInteger::from_rows(&[[1, 2], [3, 4]]).unwrap();
    let mut b = a.clone();
    assert!(b.shares_storage_with(&a));
    assert_eq!(a.storage_ref_count(), 2);

    b.update(1, 1, 10).unwrap();
    assert!(!b.shares_storage_with(&a));
    assert_eq!(a.at(1, 1).unwrap(), 1);
    assert_eq!(b.at(1, 1).unwrap(), 10);
    assert_eq!(a.storage_ref_count(), 1);
}

#[test]
fn test_shared_handles_updated_across_threads() {
    let original = MatrixInteger::from_fn(16, 16, |r, c| (r * 16 + c) as i64).unwrap();
    let handles: Vec<_> = (0..8)
        .map(|k| {
            let mut local = original.clone();
            std::thread::spawn(move || {
                for r in 1..=16 {
                    local.update(r, k + 1, -1).unwrap();
                }
                local
            })
        })
        .collect();
    let updated: Vec<MatrixInteger> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for (k, m) in updated.iter().enumerate() {
        assert!(!m.shares_storage_with(&original));
        for c in 1..=16 {
            let expected = if c == k + 1 { -1 } else { original.at(1, c).unwrap() };
            assert_eq!(m.at(1, c).unwrap(), expected);
        }
    }
    for r in 1..=16 {
        for c in 1..=16 {
            assert_eq!(original.at(r, c).unwrap(), (r * 16 + c) as i64);
        }
    }
    assert_eq!(original.storage_ref_count(), 1);
}

#[test]
fn test_pending_scale_is_observable_but_deferred() {
    let a = MatrixReal::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    let s = a.scale(2.0).unwrap();
    assert!(s.shares_storage_with(&a));
    assert_eq!(s.pending_scale(), 2.0);
    assert_eq!(s.at(2, 1).unwrap(), 6.0);
    assert_eq!(a.at(2, 1).unwrap(), 3.0);
}

// ============================================================================
// Summation
// ============================================================================

#[test]
fn test_finite_integer_sum() {
    assert_eq!(sum(&|m: i64| m, 1, 5).unwrap(), 15);
}

#[test]
fn test_geometric_series_within_a_dozen_terms() {
    let options = SummationOptions::default().with_max_terms(12);
    let s = sum_with(
        &|m: i64| 1.0 / 2f64.powi(m as i32),
        0,
        SumBound::PosInfinity,
        &options,
    )
    .unwrap();
    assert!((s - 2.0).abs() < 1e-12, "got {s}");
}

// ============================================================================
// Boundary behaviour
// ============================================================================

#[test]
fn test_empty_matrix_combinators() {
    let m = MatrixReal::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    let empty = MatrixReal::empty();
    assert_eq!(m.combine_left_to_right(&empty).unwrap(), m);
    assert_eq!(empty.combine_left_to_right(&m).unwrap(), m);
    assert_eq!(empty.combine_top_to_bottom(&m).unwrap(), m);
}

#[test]
fn test_identity_extents() {
    assert!(ops::identity_real(0i64, 0i64).unwrap().is_empty());
    let m = ops::identity_integer(0i64, 4i64).unwrap();
    assert_eq!(m.shape(), (0, 4));
    assert_eq!(m.number_coefficients(), 0);
}

#[test]
fn test_non_integer_complex_index() {
    let m = MatrixReal::from_rows(&[[1.0, 2.0]]).unwrap();
    let err = m.element(c(1.5, 0.0), 1i64).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidIndex);
    assert_eq!(m.element(c(1.0, 0.0), 2i64).unwrap(), 2.0);
}
