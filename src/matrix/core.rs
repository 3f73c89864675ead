//! Core Matrix type: construction, element access and mutation

use super::Matrix;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::storage::{Data, DensityPolicy, Layout, SparseData, Storage, checked_len};
use std::fmt;

impl<T: Element> Matrix<T> {
    /// Create a matrix from storage and pending transforms
    pub(crate) fn from_parts(storage: Storage<T>, transposed: bool, scale: T) -> Self {
        Self {
            storage,
            transposed,
            scale,
        }
    }

    /// Wrap a store with no pending transforms
    pub(crate) fn from_storage(storage: Storage<T>) -> Self {
        Self::from_parts(storage, false, T::one())
    }

    /// Matrix of the given extents with every coefficient at the default value
    ///
    /// Boolean matrices start sparse, the other domains dense.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::from_storage(Storage::zeros(rows, cols)?))
    }

    /// Explicitly sparse all-default matrix
    pub fn sparse(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::from_storage(Storage::sparse(rows, cols)?))
    }

    /// The 0x0 matrix
    pub fn empty() -> Self {
        Self::from_storage(Storage::new(Data::Sparse(SparseData::new(0, 0))))
    }

    /// Copy a column-major buffer
    pub fn from_column_major(rows: usize, cols: usize, values: &[T]) -> Result<Self> {
        Self::from_column_major_vec(rows, cols, values.to_vec())
    }

    /// Take ownership of a column-major buffer
    pub fn from_column_major_vec(rows: usize, cols: usize, values: Vec<T>) -> Result<Self> {
        Ok(Self::from_storage(Storage::from_column_major(
            rows, cols, values,
        )?))
    }

    /// Take ownership of a row-major buffer
    pub fn from_row_major(rows: usize, cols: usize, values: Vec<T>) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        if values.len() != len {
            return Err(Error::invalid_parameter(
                "values",
                format!(
                    "expected {len} coefficients for a {rows}x{cols} matrix, got {}",
                    values.len()
                ),
            ));
        }
        // Row-major rows x cols is column-major cols x rows
        Ok(Self::from_parts(
            Storage::from_column_major(cols, rows, values)?,
            true,
            T::one(),
        ))
    }

    /// Build from nested rows, e.g. `Matrix::from_rows(&[[1, 2], [3, 4]])`
    pub fn from_rows<const C: usize>(rows: &[[T; C]]) -> Result<Self> {
        let values = rows.iter().flat_map(|r| r.iter().copied()).collect();
        let mut m = Self::from_row_major(rows.len(), C, values)?;
        m.materialize()?;
        Ok(m)
    }

    /// Build from a function of the one-based `(row, col)` position
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        let mut values = Vec::with_capacity(checked_len(rows, cols)?);
        for c in 1..=cols {
            for r in 1..=rows {
                values.push(f(r, c));
            }
        }
        Self::from_values(rows, cols, values)
    }

    /// Result buffer of an operation
    ///
    /// Boolean results pick their representation from their density; other
    /// domains stay dense.
    pub(crate) fn from_values(rows: usize, cols: usize, values: Vec<T>) -> Result<Self> {
        let storage = if T::DTYPE == crate::dtype::DType::Boolean {
            Storage::from_column_major_balanced(rows, cols, values, &DensityPolicy::default())?
        } else {
            Storage::from_column_major(rows, cols, values)?
        };
        Ok(Self::from_storage(storage))
    }

    /// `n x n` identity
    pub fn identity(n: usize) -> Result<Self> {
        Self::identity_rect(n, n)
    }

    /// `rows x cols` Kronecker delta
    pub fn identity_rect(rows: usize, cols: usize) -> Result<Self> {
        let mut m = Self::new(rows, cols)?;
        let data = m.storage.data_mut();
        for i in 0..rows.min(cols) {
            data.set(i, i, T::one());
        }
        Ok(m)
    }

    /// All-default matrix (alias of [`Matrix::new`])
    pub fn zero(rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols)
    }

    /// Every coefficient set to one
    pub fn ones(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, T::one())
    }

    /// Every coefficient set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        let values = crate::storage::allocate(len, value)?;
        Self::from_values(rows, cols, values)
    }

    /// Square matrix with `values` on the diagonal
    pub fn diagonal(values: &[T]) -> Result<Self> {
        let n = values.len();
        let mut m = Self::new(n, n)?;
        let data = m.storage.data_mut();
        for (i, &v) in values.iter().enumerate() {
            data.set(i, i, v);
        }
        Ok(m)
    }

    /// Number of rows of the logical value
    #[inline]
    pub fn rows(&self) -> usize {
        if self.transposed {
            self.storage.cols()
        } else {
            self.storage.rows()
        }
    }

    /// Number of columns of the logical value
    #[inline]
    pub fn cols(&self) -> usize {
        if self.transposed {
            self.storage.rows()
        } else {
            self.storage.cols()
        }
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        let data = self.storage.read();
        if self.transposed {
            (data.cols(), data.rows())
        } else {
            (data.rows(), data.cols())
        }
    }

    /// `rows × cols`
    #[inline]
    pub fn number_coefficients(&self) -> usize {
        let (r, c) = self.shape();
        r * c
    }

    /// True if either extent is zero
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.number_coefficients() == 0
    }

    /// Physical representation of the backing store
    pub fn layout(&self) -> Layout {
        self.storage.layout()
    }

    /// True if a transpose is pending on this handle
    #[inline]
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// Scalar multiplier pending on this handle
    #[inline]
    pub fn pending_scale(&self) -> T {
        self.scale
    }

    /// True if both handles share one backing store
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.storage.ptr_eq(&other.storage)
    }

    /// Number of handles sharing the backing store
    pub fn storage_ref_count(&self) -> usize {
        self.storage.ref_count()
    }

    /// Swap the store representation if its density crosses `policy`
    pub fn rebalance(&self, policy: &DensityPolicy) -> Result<Option<Layout>> {
        self.storage.rebalance(policy)
    }

    /// Logical coefficient at a zero-based position (caller validated)
    #[inline]
    pub(crate) fn get(&self, row: usize, col: usize) -> T {
        let data = self.storage.read();
        self.get_from(&data, row, col)
    }

    #[inline]
    pub(crate) fn get_from(&self, data: &Data<T>, row: usize, col: usize) -> T {
        let v = if self.transposed {
            data.get(col, row)
        } else {
            data.get(row, col)
        };
        if T::LAZY_SCALE { v.scale_by(self.scale) } else { v }
    }

    /// Coefficient at one-based `(row, col)`
    pub fn at(&self, row: usize, col: usize) -> Result<T> {
        let (rows, cols) = self.shape();
        if row == 0 || col == 0 || row > rows || col > cols {
            return Err(Error::invalid_index(row, col, rows, cols));
        }
        Ok(self.get(row - 1, col - 1))
    }

    /// Coefficient at a one-based row-major linear index
    pub fn at_index(&self, index: usize) -> Result<T> {
        let (rows, cols) = self.shape();
        let len = rows * cols;
        if index == 0 || index > len {
            return Err(Error::InvalidLinearIndex { index, len });
        }
        Ok(self.get((index - 1) / cols, (index - 1) % cols))
    }

    /// Logical coefficients in column-major order
    pub fn to_column_major_vec(&self) -> Result<Vec<T>> {
        if !self.has_pending() {
            return self.storage.to_column_major_vec();
        }
        let data = self.storage.read();
        let (rows, cols) = self.shape_of(&data);
        let mut out = Vec::new();
        out.try_reserve_exact(rows * cols)
            .map_err(|_| Error::OutOfMemory { elements: rows * cols })?;
        for c in 0..cols {
            for r in 0..rows {
                out.push(self.get_from(&data, r, c));
            }
        }
        Ok(out)
    }

    /// Logical coefficients in row-major order
    pub fn to_row_major_vec(&self) -> Result<Vec<T>> {
        let data = self.storage.read();
        let (rows, cols) = self.shape_of(&data);
        let mut out = Vec::new();
        out.try_reserve_exact(rows * cols)
            .map_err(|_| Error::OutOfMemory { elements: rows * cols })?;
        for r in 0..rows {
            for c in 0..cols {
                out.push(self.get_from(&data, r, c));
            }
        }
        Ok(out)
    }

    pub(crate) fn shape_of(&self, data: &Data<T>) -> (usize, usize) {
        if self.transposed {
            (data.cols(), data.rows())
        } else {
            (data.rows(), data.cols())
        }
    }

    /// Row `row` as a `1 x cols` matrix
    pub fn row(&self, row: usize) -> Result<Self> {
        let (rows, cols) = self.shape();
        if row == 0 || row > rows {
            return Err(Error::invalid_index(row, 1, rows, cols));
        }
        let values = (0..cols).map(|c| self.get(row - 1, c)).collect();
        Self::from_values(1, cols, values)
    }

    /// Column `col` as a `rows x 1` matrix
    pub fn column(&self, col: usize) -> Result<Self> {
        let (rows, cols) = self.shape();
        if col == 0 || col > cols {
            return Err(Error::invalid_index(1, col, rows, cols));
        }
        let values = (0..rows).map(|r| self.get(r, col - 1)).collect();
        Self::from_values(rows, 1, values)
    }

    /// Main diagonal coefficients
    pub fn diagonal_entries(&self) -> Vec<T> {
        let data = self.storage.read();
        let (rows, cols) = self.shape_of(&data);
        (0..rows.min(cols)).map(|i| self.get_from(&data, i, i)).collect()
    }

    #[inline]
    pub(crate) fn has_pending(&self) -> bool {
        self.transposed || self.scale != T::one()
    }

    /// Bake pending transforms into a private store
    ///
    /// Afterwards the handle has no pending transpose and a unit scale.
    pub fn materialize(&mut self) -> Result<()> {
        if self.has_pending() {
            self.storage.apply_pending(self.transposed, self.scale)?;
            self.transposed = false;
            self.scale = T::one();
        }
        Ok(())
    }

    /// Set a coefficient, growing the matrix if the position is outside it
    ///
    /// Returns false (leaving the matrix unchanged) for a zero index or if
    /// the store cannot grow.
    pub fn set_value(&mut self, row: usize, col: usize, value: T) -> bool {
        self.update(row, col, value).is_ok()
    }

    /// Set a coefficient, growing the matrix if the position is outside it
    ///
    /// Copy-on-write: other handles sharing the store never see the change.
    pub fn update(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let (rows, cols) = self.shape();
        if row == 0 || col == 0 {
            return Err(Error::invalid_index(row, col, rows, cols));
        }
        self.materialize()?;
        if row > rows || col > cols {
            self.storage.resize(rows.max(row), cols.max(col))?;
        }
        self.storage.update(row, col, value)
    }

    /// Set the coefficient at a one-based row-major linear index
    pub fn update_index(&mut self, index: usize, value: T) -> Result<()> {
        let (rows, cols) = self.shape();
        let len = rows * cols;
        if index == 0 || index > len {
            return Err(Error::InvalidLinearIndex { index, len });
        }
        self.update((index - 1) / cols + 1, (index - 1) % cols + 1, value)
    }

    /// Change extents, keeping coefficients that stay in range and filling
    /// new cells with the default value
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        self.materialize()?;
        self.storage.resize(rows, cols)
    }
}

impl<T: Element> Default for Matrix<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Logical equality: equal extents and equal coefficients
impl<T: Element> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        let same_store = self.storage.ptr_eq(&other.storage);
        if same_store && self.transposed == other.transposed && self.scale == other.scale {
            return true;
        }
        let (rows, cols) = self.shape();
        if same_store {
            let data = self.storage.read();
            return (0..rows).all(|r| {
                (0..cols).all(|c| self.get_from(&data, r, c) == other.get_from(&data, r, c))
            });
        }
        // at most one store is locked at a time
        let Ok(rhs) = other.to_column_major_vec() else {
            return false;
        };
        let lhs = self.storage.read();
        (0..cols).all(|c| (0..rows).all(|r| self.get_from(&lhs, r, c) == rhs[c * rows + r]))
    }
}

impl<T: Element> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("dtype", &T::DTYPE)
            .field("shape", &self.shape())
            .field("transposed", &self.transposed)
            .field("scale", &self.scale)
            .field("storage", &self.storage)
            .finish()
    }
}

impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.storage.read();
        let (rows, cols) = self.shape_of(&data);
        f.write_str("[")?;
        for r in 0..rows {
            if r > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for c in 0..cols {
                if c > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", self.get_from(&data, r, c))?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::matrix::{MatrixBoolean, MatrixReal};

    #[test]
    fn test_from_rows_and_access() {
        let m = MatrixReal::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.at(2, 3).unwrap(), 6.0);
        assert_eq!(m.at_index(2).unwrap(), 2.0);
        assert_eq!(m.at_index(4).unwrap(), 4.0);
        assert_eq!(m.to_column_major_vec().unwrap(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_invalid_indices() {
        let m = MatrixReal::new(2, 2).unwrap();
        assert_eq!(m.at(0, 1).unwrap_err().kind(), ErrorKind::InvalidIndex);
        assert_eq!(m.at(1, 3).unwrap_err().kind(), ErrorKind::InvalidIndex);
        assert_eq!(m.at_index(5).unwrap_err().kind(), ErrorKind::InvalidIndex);
    }

    #[test]
    fn test_boolean_matrix_starts_sparse() {
        let m = MatrixBoolean::new(3, 3).unwrap();
        assert_eq!(m.layout(), Layout::Sparse);
        assert_eq!(MatrixReal::new(3, 3).unwrap().layout(), Layout::Dense);
    }

    #[test]
    fn test_set_value_grows() {
        let mut m = MatrixReal::new(1, 1).unwrap();
        assert!(m.set_value(2, 3, 7.0));
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.at(2, 3).unwrap(), 7.0);
        assert_eq!(m.at(2, 1).unwrap(), 0.0);
        assert!(!m.set_value(0, 1, 1.0));
    }

    #[test]
    fn test_update_after_transpose_is_private() {
        let a = MatrixReal::from_rows(&[[1.0, 2.0]]).unwrap();
        let mut b = a.transpose();
        b.update(1, 1, 9.0).unwrap();
        assert_eq!(a.at(1, 1).unwrap(), 1.0);
        assert_eq!(b.shape(), (2, 1));
        assert_eq!(b.at(1, 1).unwrap(), 9.0);
        assert_eq!(b.at(2, 1).unwrap(), 2.0);
    }

    #[test]
    fn test_identity_shapes() {
        assert!(MatrixReal::identity(0).unwrap().is_empty());
        let m = MatrixReal::identity_rect(0, 3).unwrap();
        assert_eq!(m.shape(), (0, 3));
        let m = MatrixReal::identity_rect(2, 3).unwrap();
        assert_eq!(m.at(2, 2).unwrap(), 1.0);
        assert_eq!(m.at(1, 3).unwrap(), 0.0);
    }

    #[test]
    fn test_equality_across_views() {
        let a = MatrixReal::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let t = MatrixReal::from_rows(&[[2.0, 6.0], [4.0, 8.0]]).unwrap();
        assert_eq!(a.transpose().scale(2.0).unwrap(), t);
        assert_eq!(t, a.transpose().scale(2.0).unwrap());
        assert_ne!(a.transpose(), a);
        assert_eq!(a.scale(1.0).unwrap(), a);
    }

    #[test]
    fn test_concurrent_comparisons_with_writers() {
        let a = MatrixReal::from_fn(8, 8, |r, c| (r + c) as f64).unwrap();
        let b = MatrixReal::from_fn(8, 8, |r, c| (c + r) as f64).unwrap().transpose();
        let policy = DensityPolicy::default();
        std::thread::scope(|scope| {
            for flip in [false, true] {
                let (x, y) = if flip { (&a, &b) } else { (&b, &a) };
                scope.spawn(move || {
                    for _ in 0..500 {
                        assert_eq!(x, y);
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..500 {
                    a.rebalance(&policy).unwrap();
                    b.rebalance(&policy).unwrap();
                }
            });
        });
    }

    #[test]
    fn test_display() {
        let m = crate::matrix::MatrixInteger::from_rows(&[[1, 2], [3, 4]]).unwrap();
        assert_eq!(m.to_string(), "[[1, 2], [3, 4]]");
    }
}
