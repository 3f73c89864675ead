//! Total order over matrices of one domain

use super::Matrix;
use crate::dtype::Element;
use std::cmp::Ordering;

impl<T: Element> Matrix<T> {
    /// Total order used for keys of ordered containers
    ///
    /// Compares, in turn: pending transpose (transposed first), rows,
    /// columns, pending-scale magnitude, then the stored coefficients in
    /// row-major order of the logical shape.
    pub fn relative_order(&self, other: &Self) -> Ordering {
        other
            .transposed
            .cmp(&self.transposed)
            .then_with(|| self.rows().cmp(&other.rows()))
            .then_with(|| self.cols().cmp(&other.cols()))
            .then_with(|| {
                self.scale
                    .magnitude()
                    .total_cmp(&other.scale.magnitude())
            })
            .then_with(|| self.compare_coefficients(other))
    }

    fn compare_coefficients(&self, other: &Self) -> Ordering {
        let (rows, cols) = self.shape();
        for r in 0..rows {
            for c in 0..cols {
                let ord = self.stored(r, c).relative_order(&other.stored(r, c));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
        Ordering::Equal
    }

    /// Stored coefficient behind a logical position, without the pending scale
    fn stored(&self, row: usize, col: usize) -> T {
        let data = self.storage.read();
        if self.transposed {
            data.get(col, row)
        } else {
            data.get(row, col)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{MatrixBoolean, MatrixReal};

    #[test]
    fn test_transposed_orders_first() {
        let a = MatrixReal::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(a.transpose().relative_order(&a), Ordering::Less);
    }

    #[test]
    fn test_shape_then_coefficients() {
        let small = MatrixReal::new(1, 5).unwrap();
        let tall = MatrixReal::new(2, 1).unwrap();
        assert_eq!(small.relative_order(&tall), Ordering::Less);

        let a = MatrixBoolean::from_rows(&[[true, false], [false, true]]).unwrap();
        let b = MatrixBoolean::from_rows(&[[true, true], [true, true]]).unwrap();
        assert_eq!(a.relative_order(&b), Ordering::Less);
        assert_eq!(b.relative_order(&a), Ordering::Greater);
        assert_eq!(a.relative_order(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_scale_magnitude() {
        let a = MatrixReal::from_rows(&[[1.0]]).unwrap();
        let b = a.scale(-3.0).unwrap();
        assert_eq!(a.relative_order(&b), Ordering::Less);
    }
}
