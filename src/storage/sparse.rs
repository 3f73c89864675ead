//! Sparse payload: an ordered map of non-default coefficients

use super::dense::{DenseData, checked_len};
use crate::dtype::Element;
use crate::error::Result;
use std::collections::BTreeMap;

/// Sparse coefficient map
///
/// Keys are zero-based `(col, row)` pairs so that iteration order matches
/// the column-major order of [`DenseData`]. Only coefficients that differ
/// from the domain default are stored.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseData<T: Element> {
    rows: usize,
    cols: usize,
    entries: BTreeMap<(usize, usize), T>,
}

impl<T: Element> SparseData<T> {
    /// Empty (all-default) map with the given extents
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: BTreeMap::new(),
        }
    }

    /// Build from a dense buffer, dropping default coefficients
    pub fn from_dense(dense: &DenseData<T>) -> Self {
        let rows = dense.rows();
        let mut entries = BTreeMap::new();
        for (i, v) in dense.as_slice().iter().enumerate() {
            if !v.is_default() {
                entries.insert((i / rows, i % rows), *v);
            }
        }
        Self {
            rows,
            cols: dense.cols(),
            entries,
        }
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read a coefficient (zero-based, caller validated)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.entries
            .get(&(col, row))
            .copied()
            .unwrap_or_else(T::zero)
    }

    /// Write a coefficient (zero-based, caller validated)
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        if value.is_default() {
            self.entries.remove(&(col, row));
        } else {
            self.entries.insert((col, row), value);
        }
    }

    /// Number of stored (non-default) coefficients
    #[inline]
    pub fn count_nonzero(&self) -> usize {
        self.entries.len()
    }

    /// Stored coefficients as `((row, col), value)`, zero-based, column-major
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), T)> + '_ {
        self.entries.iter().map(|(&(c, r), &v)| ((r, c), v))
    }

    /// Expand into a dense buffer
    pub fn to_dense(&self) -> Result<DenseData<T>> {
        let mut dense = DenseData::zeros(self.rows, self.cols)?;
        for (&(c, r), &v) in &self.entries {
            dense.set(r, c, v);
        }
        Ok(dense)
    }

    /// Change extents, dropping coefficients that fall out of range
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        checked_len(rows, cols)?;
        self.entries.retain(|&(c, r), _| r < rows && c < cols);
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Transposed copy
    pub fn transposed(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
            entries: self.entries.iter().map(|(&(c, r), &v)| ((r, c), v)).collect(),
        }
    }

    /// Apply `f` to every coefficient
    ///
    /// `f` must map the default value to the default value; entries that map
    /// to the default are dropped.
    pub fn map<U: Element>(&self, f: impl Fn(T) -> U) -> SparseData<U> {
        SparseData {
            rows: self.rows,
            cols: self.cols,
            entries: self
                .entries
                .iter()
                .map(|(&k, &v)| (k, f(v)))
                .filter(|(_, v)| !v.is_default())
                .collect(),
        }
    }

    /// Multiply every stored coefficient in place, dropping any that vanish
    pub fn scale_in_place(&mut self, factor: T) {
        for v in self.entries.values_mut() {
            *v = v.scale_by(factor);
        }
        self.entries.retain(|_, v| !v.is_default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex;

    #[test]
    fn test_defaults_are_not_stored() {
        let mut s = SparseData::<bool>::new(3, 3);
        s.set(1, 2, true);
        assert_eq!(s.count_nonzero(), 1);
        assert!(s.get(1, 2));
        assert!(!s.get(2, 1));
        s.set(1, 2, false);
        assert_eq!(s.count_nonzero(), 0);
    }

    #[test]
    fn test_dense_round_trip() {
        let d = DenseData::from_column_major(2, 2, vec![0i64, 5, 0, 7]).unwrap();
        let s = SparseData::from_dense(&d);
        assert_eq!(s.count_nonzero(), 2);
        assert_eq!(s.to_dense().unwrap(), d);
    }

    #[test]
    fn test_negative_zero_is_stored() {
        let d = DenseData::from_column_major(2, 2, vec![0.0, -0.0, 0.0, 1.5]).unwrap();
        let s = SparseData::from_dense(&d);
        assert_eq!(s.count_nonzero(), 2);
        assert_eq!(s.get(1, 0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(s.get(0, 0).to_bits(), 0.0f64.to_bits());

        let mut s = SparseData::<Complex>::new(1, 2);
        s.set(0, 1, Complex::new(0.0, -0.0));
        assert_eq!(s.count_nonzero(), 1);
        s.set(0, 1, Complex::ZERO);
        assert_eq!(s.count_nonzero(), 0);

        let mut s = SparseData::<f64>::new(1, 1);
        s.set(0, 0, -0.0);
        s.scale_in_place(2.0);
        assert_eq!(s.get(0, 0).to_bits(), (-0.0f64).to_bits());
    }

    #[test]
    fn test_resize_drops_out_of_range() {
        let mut s = SparseData::<i64>::new(3, 3);
        s.set(2, 2, 9);
        s.set(0, 0, 1);
        s.resize(2, 2).unwrap();
        assert_eq!(s.count_nonzero(), 1);
        assert_eq!(s.get(0, 0), 1);
    }
}
