//! Submatrix selection and assignment through [`Indexer`]s

use super::Matrix;
use crate::collections::Indexer;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::storage::{DensityPolicy, Layout};

impl<T: Element> Matrix<T> {
    /// Coefficient selected by two single-position indexers
    ///
    /// Real and complex indices are rounded to the nearest integer.
    pub fn element(&self, row: impl Into<Indexer>, col: impl Into<Indexer>) -> Result<T> {
        let row = row.into().scalar_position()?;
        let col = col.into().scalar_position()?;
        self.at(row, col)
    }

    /// Submatrix at the crossing of the selected rows and columns
    ///
    /// The result has one row per selected row and one column per selected
    /// column, in selection order.
    pub fn select(&self, rows: impl Into<Indexer>, cols: impl Into<Indexer>) -> Result<Self> {
        let (nrows, ncols) = self.shape();
        let row_ix = rows.into().resolve(nrows)?;
        let col_ix = cols.into().resolve(ncols)?;
        let data = self.storage.read();
        let mut values = Vec::with_capacity(row_ix.len() * col_ix.len());
        for &c in &col_ix {
            for &r in &row_ix {
                values.push(self.get_from(&data, r - 1, c - 1));
            }
        }
        drop(data);
        Self::from_values(row_ix.len(), col_ix.len(), values)
    }

    /// Coefficients selected by row-major linear position
    ///
    /// The result is a column vector when `self` is one, a row vector
    /// otherwise.
    pub fn select_linear(&self, index: impl Into<Indexer>) -> Result<Self> {
        let (rows, cols) = self.shape();
        let positions = index.into().resolve(rows * cols)?;
        let values: Vec<T> = positions
            .iter()
            .map(|&p| self.get((p - 1) / cols, (p - 1) % cols))
            .collect();
        if cols == 1 {
            Self::from_values(values.len(), 1, values)
        } else {
            Self::from_values(1, values.len(), values)
        }
    }

    /// Write `value` into the selected cells
    ///
    /// `value` must have the selection's shape, or be `1 x 1` to fill every
    /// selected cell.
    pub fn assign_selection(
        &mut self,
        rows: impl Into<Indexer>,
        cols: impl Into<Indexer>,
        value: &Self,
    ) -> Result<()> {
        let (nrows, ncols) = self.shape();
        let row_ix = rows.into().resolve(nrows)?;
        let col_ix = cols.into().resolve(ncols)?;
        let shape = value.shape();
        let broadcast = shape == (1, 1);
        if !broadcast && shape != (row_ix.len(), col_ix.len()) {
            return Err(Error::shape_mismatch(
                "assign_selection",
                (row_ix.len(), col_ix.len()),
                shape,
            ));
        }
        let source = value.to_column_major_vec()?;
        self.materialize()?;
        let data = self.storage.data_mut();
        for (j, &c) in col_ix.iter().enumerate() {
            for (i, &r) in row_ix.iter().enumerate() {
                let v = if broadcast {
                    source[0]
                } else {
                    source[j * row_ix.len() + i]
                };
                data.set(r - 1, c - 1, v);
            }
        }
        if data.layout() == Layout::Sparse {
            data.rebalance(&DensityPolicy::default())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::collections::{Indexer, Range, Set, Tuple};
    use crate::dtype::Complex;
    use crate::error::ErrorKind;
    use crate::matrix::MatrixInteger;

    fn sample() -> MatrixInteger {
        MatrixInteger::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap()
    }

    #[test]
    fn test_element_with_scalar_indexers() {
        let m = sample();
        assert_eq!(m.element(2i64, 3.2).unwrap(), 6);
        assert_eq!(m.element(Complex::new(3.0, 0.0), 1i64).unwrap(), 7);
        let err = m.element(Complex::new(1.0, 0.5), 1i64).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidIndex);
        assert!(m.element(Set::from([1]), 1i64).is_err());
    }

    #[test]
    fn test_select_shapes() {
        let m = sample();
        let s = m.select(Tuple::from([3, 1]), Indexer::All).unwrap();
        assert_eq!(
            s,
            MatrixInteger::from_rows(&[[7, 8, 9], [1, 2, 3]]).unwrap()
        );
        let s = m.select(Range::new(1, 2), 2i64).unwrap();
        assert_eq!(s.shape(), (2, 1));
        assert_eq!(s.to_row_major_vec().unwrap(), vec![2, 5]);
        assert!(m.select(4i64, 1i64).is_err());
    }

    #[test]
    fn test_select_linear() {
        let m = sample();
        let s = m.select_linear(Set::from([2, 4])).unwrap();
        assert_eq!(s.shape(), (1, 2));
        assert_eq!(s.to_row_major_vec().unwrap(), vec![2, 4]);
    }

    #[test]
    fn test_assign_selection() {
        let mut m = sample();
        let original = m.clone();
        m.assign_selection(Set::from([1, 3]), Indexer::All, &MatrixInteger::filled(1, 1, 0).unwrap())
            .unwrap();
        assert_eq!(m.to_row_major_vec().unwrap(), vec![0, 0, 0, 4, 5, 6, 0, 0, 0]);
        assert_eq!(original, sample());
        let block = MatrixInteger::from_rows(&[[10, 11]]).unwrap();
        m.assign_selection(2i64, Tuple::from([3, 1]), &block).unwrap();
        assert_eq!(m.at(2, 3).unwrap(), 10);
        assert_eq!(m.at(2, 1).unwrap(), 11);
        assert!(m.assign_selection(Indexer::All, 1i64, &block).is_err());
    }
}
