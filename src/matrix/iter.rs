//! Row-major traversal of a matrix

use super::Matrix;
use crate::dtype::Element;
use crate::error::{Error, Result};

/// Forward iterator over a matrix in one-based row-major `(row, col)` order
///
/// The position `(rows, cols + 1)` is the single past-the-end sentinel.
/// A [detached](MatrixIterator::detached) iterator belongs to no matrix and
/// reports `is_valid() == false`.
///
/// The iterator borrows its matrix, so the matrix cannot be mutated while
/// the iterator is alive.
#[derive(Clone, Debug)]
pub struct MatrixIterator<'a, T: Element> {
    matrix: Option<&'a Matrix<T>>,
    rows: usize,
    cols: usize,
    row: usize,
    col: usize,
}

impl<'a, T: Element> MatrixIterator<'a, T> {
    /// Iterator positioned on the first coefficient (or the end of an empty
    /// matrix)
    pub fn begin(matrix: &'a Matrix<T>) -> Self {
        let (rows, cols) = matrix.shape();
        let mut it = Self {
            matrix: Some(matrix),
            rows,
            cols,
            row: 1,
            col: 1,
        };
        if rows * cols == 0 {
            it.seek_end();
        }
        it
    }

    /// Past-the-end iterator
    pub fn end(matrix: &'a Matrix<T>) -> Self {
        let (rows, cols) = matrix.shape();
        let mut it = Self {
            matrix: Some(matrix),
            rows,
            cols,
            row: 1,
            col: 1,
        };
        it.seek_end();
        it
    }

    /// Iterator attached to no matrix
    pub fn detached() -> Self {
        Self {
            matrix: None,
            rows: 0,
            cols: 0,
            row: 0,
            col: 0,
        }
    }

    fn seek_end(&mut self) {
        self.row = self.rows;
        self.col = self.cols + 1;
    }

    /// False for a detached iterator
    pub fn is_valid(&self) -> bool {
        self.matrix.is_some()
    }

    /// True at the past-the-end sentinel
    pub fn is_end(&self) -> bool {
        self.row == self.rows && self.col == self.cols + 1
    }

    /// Current one-based row
    pub fn row(&self) -> usize {
        self.row
    }

    /// Current one-based column
    pub fn col(&self) -> usize {
        self.col
    }

    /// Number of coefficients before the sentinel
    fn remaining(&self) -> usize {
        if self.matrix.is_none() || self.is_end() {
            return 0;
        }
        self.rows * self.cols - self.linear_position()
    }

    fn linear_position(&self) -> usize {
        (self.row - 1) * self.cols + (self.col - 1)
    }

    /// Step to the next coefficient; stays put at the end
    pub fn advance(&mut self) {
        self.advance_by(1);
    }

    /// Step `n` coefficients forward, clamping at the end sentinel
    pub fn advance_by(&mut self, n: usize) {
        if self.matrix.is_none() || self.is_end() {
            return;
        }
        let total = self.rows * self.cols;
        let target = self.linear_position().saturating_add(n);
        if target >= total {
            self.seek_end();
        } else {
            self.row = target / self.cols + 1;
            self.col = target % self.cols + 1;
        }
    }

    /// Coefficient at the current position
    pub fn value(&self) -> Result<T> {
        match self.matrix {
            Some(m) if !self.is_end() => Ok(m.get(self.row - 1, self.col - 1)),
            _ => Err(Error::invalid_index(self.row, self.col, self.rows, self.cols)),
        }
    }
}

/// Iterators compare by position only
impl<T: Element> PartialEq for MatrixIterator<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col
    }
}

impl<T: Element> Iterator for MatrixIterator<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = self.value().ok()?;
        self.advance();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        self.advance_by(n);
        self.next()
    }
}

impl<T: Element> ExactSizeIterator for MatrixIterator<'_, T> {}

impl<T: Element> std::iter::FusedIterator for MatrixIterator<'_, T> {}

impl<T: Element> Matrix<T> {
    /// Iterator over the coefficients in row-major order
    pub fn iter(&self) -> MatrixIterator<'_, T> {
        MatrixIterator::begin(self)
    }

    /// Iterator on the first coefficient
    pub fn begin(&self) -> MatrixIterator<'_, T> {
        MatrixIterator::begin(self)
    }

    /// Past-the-end iterator
    pub fn end(&self) -> MatrixIterator<'_, T> {
        MatrixIterator::end(self)
    }
}

impl<'a, T: Element> IntoIterator for &'a Matrix<T> {
    type Item = T;
    type IntoIter = MatrixIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{MatrixInteger, MatrixReal};

    #[test]
    fn test_row_major_order() {
        let m = MatrixInteger::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(m.iter().len(), 6);
        assert_eq!(m.transpose().iter().collect::<Vec<_>>(), vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_sentinel_and_clamping() {
        let m = MatrixReal::new(2, 3).unwrap();
        let mut it = m.begin();
        it.advance_by(4);
        assert_eq!((it.row(), it.col()), (2, 2));
        it.advance_by(100);
        assert_eq!(it, m.end());
        assert_eq!((it.row(), it.col()), (2, 4));
        assert!(it.value().is_err());
        it.advance();
        assert_eq!(it, m.end());
    }

    #[test]
    fn test_empty_matrix() {
        let m = MatrixReal::new(0, 3).unwrap();
        assert_eq!(m.begin(), m.end());
        assert_eq!(m.iter().count(), 0);
    }

    #[test]
    fn test_detached() {
        let it = MatrixIterator::<f64>::detached();
        assert!(!it.is_valid());
        assert!(it.value().is_err());
    }
}
