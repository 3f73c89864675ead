//! Dense column-major payload

use super::allocate;
use crate::dtype::Element;
use crate::error::{Error, Result};

/// Dense coefficient buffer in column-major order
///
/// Element `(r, c)` (zero-based) lives at `values[c * rows + r]`, which is the
/// packing expected by the LinAlg kernels and by the persisted format.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseData<T: Element> {
    rows: usize,
    cols: usize,
    values: Vec<T>,
}

impl<T: Element> DenseData<T> {
    /// Allocate a buffer filled with the domain's default value
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, T::zero())
    }

    /// Allocate a buffer with every coefficient set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            values: allocate(len, value)?,
        })
    }

    /// Wrap an existing column-major buffer
    pub fn from_column_major(rows: usize, cols: usize, values: Vec<T>) -> Result<Self> {
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
        Ok(Self { rows, cols, values })
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
        self.values[col * self.rows + row]
    }

    /// Write a coefficient (zero-based, caller validated)
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.values[col * self.rows + row] = value;
    }

    /// Column-major view of the coefficients
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Mutable column-major view of the coefficients
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Consume the buffer
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    /// Number of coefficients that differ from the default value
    pub fn count_nonzero(&self) -> usize {
        self.values.iter().filter(|v| !v.is_default()).count()
    }

    /// Change extents, keeping coefficients that stay in range
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        if rows == self.rows && cols == self.cols {
            return Ok(());
        }
        let mut values = allocate(checked_len(rows, cols)?, T::zero())?;
        let keep_rows = rows.min(self.rows);
        for c in 0..cols.min(self.cols) {
            let src = &self.values[c * self.rows..c * self.rows + keep_rows];
            values[c * rows..c * rows + keep_rows].copy_from_slice(src);
        }
        self.rows = rows;
        self.cols = cols;
        self.values = values;
        Ok(())
    }

    /// Physically transposed copy
    pub fn transposed(&self) -> Result<Self> {
        let mut values = allocate(self.values.len(), T::zero())?;
        for c in 0..self.cols {
            for r in 0..self.rows {
                values[r * self.cols + c] = self.values[c * self.rows + r];
            }
        }
        Ok(Self {
            rows: self.cols,
            cols: self.rows,
            values,
        })
    }

    /// Multiply every coefficient in place
    pub fn scale_in_place(&mut self, factor: T) {
        for v in &mut self.values {
            *v = v.scale_by(factor);
        }
    }
}

/// `rows * cols`, failing with `OutOfMemory` on overflow
pub(crate) fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(Error::OutOfMemory {
        elements: usize::MAX,
    })
}
