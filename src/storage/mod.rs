//! Storage: shared, copy-on-write coefficient stores
//!
//! A [`Storage`] handle wraps an `Arc` around a lock-protected [`Data`]
//! payload. Cloning the handle shares the payload (zero-copy); the payload is
//! released when the last handle is dropped. Any mutation first makes the
//! payload private to the mutating handle, so changes are never observable
//! through other handles.
//!
//! The lock serialises representation swaps (dense ↔ sparse), which keep the
//! logical value intact and are therefore allowed on shared payloads.

mod dense;
mod sparse;

pub use dense::DenseData;
pub use sparse::SparseData;

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;
use tracing::{debug, trace};

pub(crate) use dense::checked_len;

/// Physical representation of a store
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Column-major buffer holding every coefficient
    Dense,
    /// Ordered map holding only non-default coefficients
    Sparse,
}

/// Density thresholds that drive dense/sparse swaps
///
/// Density is the fraction of coefficients that differ from the domain
/// default. The gap between the two thresholds keeps a store from flipping
/// back and forth around a single value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityPolicy {
    /// A sparse store becomes dense once its density exceeds this (default: 0.25)
    pub sparse_to_dense: f64,
    /// A dense store becomes sparse once its density drops below this (default: 0.05)
    pub dense_to_sparse: f64,
}

impl Default for DensityPolicy {
    fn default() -> Self {
        Self {
            sparse_to_dense: 0.25,
            dense_to_sparse: 0.05,
        }
    }
}

/// Concrete payload of a store
#[derive(Clone, Debug, PartialEq)]
pub enum Data<T: Element> {
    /// Dense column-major payload
    Dense(DenseData<T>),
    /// Sparse payload
    Sparse(SparseData<T>),
}

impl<T: Element> Data<T> {
    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        match self {
            Self::Dense(d) => d.rows(),
            Self::Sparse(s) => s.rows(),
        }
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        match self {
            Self::Dense(d) => d.cols(),
            Self::Sparse(s) => s.cols(),
        }
    }

    /// Physical representation
    #[inline]
    pub fn layout(&self) -> Layout {
        match self {
            Self::Dense(_) => Layout::Dense,
            Self::Sparse(_) => Layout::Sparse,
        }
    }

    /// Read a coefficient (zero-based, caller validated)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        match self {
            Self::Dense(d) => d.get(row, col),
            Self::Sparse(s) => s.get(row, col),
        }
    }

    /// Write a coefficient (zero-based, caller validated)
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        match self {
            Self::Dense(d) => d.set(row, col, value),
            Self::Sparse(s) => s.set(row, col, value),
        }
    }

    /// Read a coefficient with one-based indices
    pub fn value(&self, row: usize, col: usize) -> Result<T> {
        self.check_index(row, col)?;
        Ok(self.get(row - 1, col - 1))
    }

    /// Write a coefficient with one-based indices
    pub fn update(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_index(row, col)?;
        self.set(row - 1, col - 1, value);
        Ok(())
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        let (rows, cols) = (self.rows(), self.cols());
        if row == 0 || col == 0 || row > rows || col > cols {
            return Err(Error::invalid_index(row, col, rows, cols));
        }
        Ok(())
    }

    /// Number of coefficients that differ from the default value
    pub fn count_nonzero(&self) -> usize {
        match self {
            Self::Dense(d) => d.count_nonzero(),
            Self::Sparse(s) => s.count_nonzero(),
        }
    }

    /// Copy of the coefficients in column-major order
    pub fn to_column_major_vec(&self) -> Result<Vec<T>> {
        match self {
            Self::Dense(d) => Ok(d.as_slice().to_vec()),
            Self::Sparse(s) => Ok(s.to_dense()?.into_vec()),
        }
    }

    /// Change extents, keeping in-range coefficients
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        match self {
            Self::Dense(d) => d.resize(rows, cols),
            Self::Sparse(s) => s.resize(rows, cols),
        }
    }

    /// Payload whose logical contents are `scale · (transpose ? Dᵀ : D)`
    pub fn transformed(&self, transpose: bool, scale: T) -> Result<Self> {
        let mut out = match (self, transpose) {
            (Self::Dense(d), true) => Self::Dense(d.transposed()?),
            (Self::Sparse(s), true) => Self::Sparse(s.transposed()),
            (data, false) => data.clone(),
        };
        out.scale_in_place(scale);
        Ok(out)
    }

    /// Apply a default-preserving map to every coefficient, keeping the
    /// representation
    pub fn map<U: Element>(&self, f: impl Fn(T) -> U) -> Result<Data<U>> {
        Ok(match self {
            Self::Dense(d) => Data::Dense(DenseData::from_column_major(
                d.rows(),
                d.cols(),
                d.as_slice().iter().map(|&v| f(v)).collect(),
            )?),
            Self::Sparse(s) => Data::Sparse(s.map(f)),
        })
    }

    fn scale_in_place(&mut self, scale: T) {
        if scale == T::one() {
            return;
        }
        match self {
            Self::Dense(d) => d.scale_in_place(scale),
            Self::Sparse(s) => s.scale_in_place(scale),
        }
    }

    /// Swap representation when density crosses a policy threshold
    ///
    /// Returns the new layout if a swap happened.
    pub fn rebalance(&mut self, policy: &DensityPolicy) -> Result<Option<Layout>> {
        let len = self.rows() * self.cols();
        if len == 0 {
            return Ok(None);
        }
        let density = self.count_nonzero() as f64 / len as f64;
        match self {
            Self::Sparse(s) if density > policy.sparse_to_dense => {
                *self = Self::Dense(s.to_dense()?);
                Ok(Some(Layout::Dense))
            }
            Self::Dense(d) if density < policy.dense_to_sparse => {
                *self = Self::Sparse(SparseData::from_dense(d));
                Ok(Some(Layout::Sparse))
            }
            _ => Ok(None),
        }
    }
}

/// Shared handle to a coefficient store
///
/// Clone increments the reference count; dropping the last handle releases
/// the payload.
pub struct Storage<T: Element> {
    inner: Arc<StorageInner<T>>,
}

struct StorageInner<T: Element> {
    data: RwLock<Data<T>>,
}

impl<T: Element> Clone for StorageInner<T> {
    /// Deep copy used by copy-on-write
    fn clone(&self) -> Self {
        Self {
            data: RwLock::new(self.data.read().clone()),
        }
    }
}

impl<T: Element> Storage<T> {
    /// Wrap a payload in a fresh, uniquely owned store
    pub fn new(data: Data<T>) -> Self {
        Self {
            inner: Arc::new(StorageInner {
                data: RwLock::new(data),
            }),
        }
    }

    /// All-default dense store
    pub fn dense(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::new(Data::Dense(DenseData::zeros(rows, cols)?)))
    }

    /// All-default sparse store
    pub fn sparse(rows: usize, cols: usize) -> Result<Self> {
        checked_len(rows, cols)?;
        Ok(Self::new(Data::Sparse(SparseData::new(rows, cols))))
    }

    /// All-default store in the domain's preferred representation
    ///
    /// Boolean stores start sparse; integer, real and complex stores start
    /// dense.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        if T::DTYPE == DType::Boolean {
            Self::sparse(rows, cols)
        } else {
            Self::dense(rows, cols)
        }
    }

    /// Dense store over a column-major buffer
    pub fn from_column_major(rows: usize, cols: usize, values: Vec<T>) -> Result<Self> {
        Ok(Self::new(Data::Dense(DenseData::from_column_major(
            rows, cols, values,
        )?)))
    }

    /// Store over a column-major buffer in the representation suggested by
    /// its density
    pub fn from_column_major_balanced(
        rows: usize,
        cols: usize,
        values: Vec<T>,
        policy: &DensityPolicy,
    ) -> Result<Self> {
        let mut data = Data::Dense(DenseData::from_column_major(rows, cols, values)?);
        data.rebalance(policy)?;
        Ok(Self::new(data))
    }

    /// Lock the payload for reading
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, Data<T>> {
        self.inner.data.read()
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.read().rows()
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.read().cols()
    }

    /// Physical representation
    #[inline]
    pub fn layout(&self) -> Layout {
        self.read().layout()
    }

    /// Read a coefficient with one-based indices
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> Result<T> {
        self.read().value(row, col)
    }

    /// Copy of the coefficients in column-major order
    pub fn to_column_major_vec(&self) -> Result<Vec<T>> {
        self.read().to_column_major_vec()
    }

    /// Get the reference count
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// True if another handle refers to the same payload
    #[inline]
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.inner) > 1
    }

    /// True if both handles refer to the same payload
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Make the payload private to this handle, copying it if shared
    pub fn clone_if_shared(&mut self) {
        if self.is_shared() {
            trace!(refs = self.ref_count(), "copy-on-write clone of shared store");
        }
        Arc::make_mut(&mut self.inner);
    }

    /// Mutable access to a private payload
    pub fn data_mut(&mut self) -> &mut Data<T> {
        Arc::make_mut(&mut self.inner).data.get_mut()
    }

    /// Write a coefficient with one-based indices (copy-on-write)
    pub fn update(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let data = self.data_mut();
        data.update(row, col, value)?;
        if data.layout() == Layout::Sparse {
            data.rebalance(&DensityPolicy::default())?;
        }
        Ok(())
    }

    /// Change extents (copy-on-write), filling new cells with the default
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        self.data_mut().resize(rows, cols)
    }

    /// Bake a pending transpose and scale into the payload
    ///
    /// A uniquely owned payload is replaced in place; a shared one is left
    /// untouched for the other handles and this handle moves to a new store.
    pub fn apply_pending(&mut self, transpose: bool, scale: T) -> Result<()> {
        if !transpose && scale == T::one() {
            return Ok(());
        }
        trace!(transpose, shared = self.is_shared(), "materialising pending transforms");
        let transformed = self.read().transformed(transpose, scale)?;
        match Arc::get_mut(&mut self.inner) {
            Some(inner) => *inner.data.get_mut() = transformed,
            None => *self = Self::new(transformed),
        }
        Ok(())
    }

    /// Swap representation if density crosses a threshold
    ///
    /// The logical value is unchanged, so this is allowed on shared stores.
    pub fn rebalance(&self, policy: &DensityPolicy) -> Result<Option<Layout>> {
        let swapped = self.inner.data.write().rebalance(policy)?;
        if let Some(layout) = swapped {
            debug!(?layout, dtype = %T::DTYPE, "store changed representation");
        }
        Ok(swapped)
    }
}

impl<T: Element> Clone for Storage<T> {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Element> std::fmt::Debug for Storage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.read();
        f.debug_struct("Storage")
            .field("rows", &data.rows())
            .field("cols", &data.cols())
            .field("layout", &data.layout())
            .field("dtype", &T::DTYPE)
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}

/// Allocate a vector, reporting allocation failure instead of aborting
pub(crate) fn allocate<T: Clone>(len: usize, fill: T) -> Result<Vec<T>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| Error::OutOfMemory { elements: len })?;
    values.resize(len, fill);
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_stores_start_sparse() {
        assert_eq!(Storage::<bool>::zeros(4, 4).unwrap().layout(), Layout::Sparse);
        assert_eq!(Storage::<f64>::zeros(4, 4).unwrap().layout(), Layout::Dense);
    }

    #[test]
    fn test_clone_shares_payload() {
        let a = Storage::from_column_major(2, 1, vec![1i64, 2]).unwrap();
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.ref_count(), 2);
        drop(b);
        assert!(!a.is_shared());
    }

    #[test]
    fn test_update_is_copy_on_write() {
        let a = Storage::from_column_major(2, 1, vec![1i64, 2]).unwrap();
        let mut b = a.clone();
        b.update(2, 1, 20).unwrap();
        assert_eq!(a.value(2, 1).unwrap(), 2);
        assert_eq!(b.value(2, 1).unwrap(), 20);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_invalid_index() {
        let a = Storage::<f64>::dense(2, 2).unwrap();
        assert!(a.value(0, 1).is_err());
        assert!(a.value(3, 1).is_err());
        assert!(a.value(2, 2).is_ok());
    }

    #[test]
    fn test_apply_pending_on_shared_store_moves_handle() {
        let a = Storage::from_column_major(1, 2, vec![1.0, 2.0]).unwrap();
        let mut b = a.clone();
        b.apply_pending(true, 3.0).unwrap();
        assert!(!a.ptr_eq(&b));
        assert_eq!((b.rows(), b.cols()), (2, 1));
        assert_eq!(b.value(2, 1).unwrap(), 6.0);
        assert_eq!(a.value(1, 2).unwrap(), 2.0);
    }

    #[test]
    fn test_sparse_store_densifies() {
        let mut s = Storage::<bool>::zeros(2, 2).unwrap();
        s.update(1, 1, true).unwrap();
        assert_eq!(s.layout(), Layout::Sparse);
        s.update(2, 2, true).unwrap();
        assert_eq!(s.layout(), Layout::Dense);
        assert!(s.value(2, 2).unwrap());
    }

    #[test]
    fn test_rebalance_dense_to_sparse() {
        let mut values = vec![0i64; 100];
        values[7] = 3;
        let s = Storage::from_column_major(10, 10, values).unwrap();
        assert_eq!(s.rebalance(&DensityPolicy::default()).unwrap(), Some(Layout::Sparse));
        assert_eq!(s.value(8, 1).unwrap(), 3);
    }
}
