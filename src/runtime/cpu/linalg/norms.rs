//! Matrix norms, condition number and equilibration

use super::super::jacobi::LinalgElement;
use super::svd::gesdd;
use crate::runtime::{EquilibrationFactors, Status};

/// Maximum absolute column sum of an `m x n` column-major matrix
pub fn one_norm<T: LinalgElement>(m: usize, n: usize, a: &[T]) -> f64 {
    (0..n)
        .map(|j| a[j * m..(j + 1) * m].iter().map(|v| v.abs_val()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Maximum absolute row sum of an `m x n` column-major matrix
pub fn infinity_norm<T: LinalgElement>(m: usize, n: usize, a: &[T]) -> f64 {
    let mut sums = vec![0.0; m];
    for j in 0..n {
        for (s, v) in sums.iter_mut().zip(&a[j * m..(j + 1) * m]) {
            *s += v.abs_val();
        }
    }
    sums.into_iter().fold(0.0, f64::max)
}

/// `σ_max / σ_min`; infinite for a singular matrix, zero for an empty one
pub fn condition_number<T: LinalgElement>(m: usize, n: usize, a: &[T]) -> f64 {
    let svd = gesdd(m, n, a);
    match (svd.s.first(), svd.s.last()) {
        (Some(&max), Some(&min)) if min > 0.0 => max / min,
        (Some(_), Some(_)) => f64::INFINITY,
        _ => 0.0,
    }
}

/// Row and column scalings `r`, `c` such that `diag(r)·A·diag(c)` has a
/// largest entry of magnitude one in every row and column
///
/// # Algorithm
/// ```text
/// r_i = 1 / max_j |a_ij|
/// c_j = 1 / max_i r_i·|a_ij|
/// ```
/// A zero row `i` reports status `i + 1`; a zero column `j` reports
/// `m + j + 1`. Zero rows and columns get a unit factor.
pub fn equilibrate<T: LinalgElement>(m: usize, n: usize, a: &[T]) -> EquilibrationFactors {
    let mut status = Status::OK;
    let mut r = vec![0.0f64; m];
    for j in 0..n {
        for (ri, v) in r.iter_mut().zip(&a[j * m..(j + 1) * m]) {
            *ri = ri.max(v.abs_val());
        }
    }
    for (i, ri) in r.iter_mut().enumerate() {
        if *ri == 0.0 {
            if status.is_ok() {
                status = Status::failed_at(i + 1);
            }
            *ri = 1.0;
        } else {
            *ri = 1.0 / *ri;
        }
    }

    let mut c = vec![0.0f64; n];
    for (j, cj) in c.iter_mut().enumerate() {
        let col_max = a[j * m..(j + 1) * m]
            .iter()
            .zip(&r)
            .map(|(v, ri)| v.abs_val() * ri)
            .fold(0.0, f64::max);
        if col_max == 0.0 {
            if status.is_ok() {
                status = Status::failed_at(m + j + 1);
            }
            *cj = 1.0;
        } else {
            *cj = 1.0 / col_max;
        }
    }

    EquilibrationFactors { r, c, status }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex;

    #[test]
    fn test_norms() {
        // [[1, -2], [3, 4]]
        let a = [1.0, 3.0, -2.0, 4.0];
        assert_eq!(one_norm(2, 2, &a), 6.0);
        assert_eq!(infinity_norm(2, 2, &a), 7.0);
        let c = [Complex::new(3.0, 4.0)];
        assert_eq!(one_norm(1, 1, &c), 5.0);
    }

    #[test]
    fn test_condition_number() {
        let a = [2.0, 0.0, 0.0, 0.5];
        assert!((condition_number(2, 2, &a) - 4.0).abs() < 1e-12);
        let singular = [1.0, 2.0, 2.0, 4.0];
        assert!(condition_number(2, 2, &singular) > 1e15);
        assert_eq!(condition_number::<f64>(0, 0, &[]), 0.0);
    }

    #[test]
    fn test_equilibrate() {
        let a = [100.0, 0.5, 10.0, 1.0];
        let e = equilibrate(2, 2, &a);
        assert!(e.status.is_ok());
        assert_eq!(e.r, vec![0.01, 1.0]);
        assert_eq!(e.c, vec![1.0, 1.0]);

        let zero_row = [0.0, 1.0, 0.0, 1.0];
        assert_eq!(equilibrate(2, 2, &zero_row).status, Status(1));
    }
}
