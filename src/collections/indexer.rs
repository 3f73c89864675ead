//! Uniform row/column selector

use super::{Range, Set, Tuple};
use crate::dtype::{Complex, to_index};
use crate::error::{Error, Result};
use crate::matrix::MatrixInteger;

/// Any value that can select rows or columns of a matrix
///
/// Scalar indexers select a single position; the others select a list of
/// positions whose length becomes the corresponding extent of the result.
#[derive(Clone, Debug)]
pub enum Indexer {
    /// Every position, in order
    All,
    /// One position
    Integer(i64),
    /// One position, rounded to the nearest integer
    Real(f64),
    /// One position; the imaginary part must be zero
    Complex(Complex),
    /// Arithmetic progression of positions
    Range(Range),
    /// Distinct positions in ascending order
    Set(Set),
    /// Positions in the given order, repeats allowed
    Tuple(Tuple),
    /// Positions read from the coefficients of an integer matrix (row-major)
    Matrix(MatrixInteger),
}

impl Indexer {
    /// True for the single-position indexers
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Real(_) | Self::Complex(_))
    }

    /// Resolve to one-based positions, each checked against `extent`
    pub fn resolve(&self, extent: usize) -> Result<Vec<usize>> {
        let positions = match self {
            Self::All => return Ok((1..=extent).collect()),
            Self::Integer(i) => vec![to_index(*i)?],
            Self::Real(r) => vec![to_index(*r)?],
            Self::Complex(c) => vec![to_index(*c)?],
            Self::Range(r) => r.indices()?,
            Self::Set(s) => s.indices()?,
            Self::Tuple(t) => t.indices()?,
            Self::Matrix(m) => m
                .to_row_major_vec()?
                .into_iter()
                .map(to_index)
                .collect::<Result<_>>()?,
        };
        if let Some(&bad) = positions.iter().find(|&&p| p > extent) {
            return Err(Error::InvalidLinearIndex {
                index: bad,
                len: extent,
            });
        }
        Ok(positions)
    }

    /// Resolve a scalar indexer to its single position (unchecked extent)
    pub fn scalar_position(&self) -> Result<usize> {
        match self {
            Self::Integer(i) => to_index(*i),
            Self::Real(r) => to_index(*r),
            Self::Complex(c) => to_index(*c),
            _ => Err(Error::invalid_index_value("expected a single index")),
        }
    }
}

impl From<i64> for Indexer {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<usize> for Indexer {
    fn from(v: usize) -> Self {
        Self::Integer(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Indexer {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<Complex> for Indexer {
    fn from(v: Complex) -> Self {
        Self::Complex(v)
    }
}

impl From<Range> for Indexer {
    fn from(v: Range) -> Self {
        Self::Range(v)
    }
}

impl From<Set> for Indexer {
    fn from(v: Set) -> Self {
        Self::Set(v)
    }
}

impl From<Tuple> for Indexer {
    fn from(v: Tuple) -> Self {
        Self::Tuple(v)
    }
}

impl From<MatrixInteger> for Indexer {
    fn from(v: MatrixInteger) -> Self {
        Self::Matrix(v)
    }
}

impl From<std::ops::RangeInclusive<i64>> for Indexer {
    fn from(v: std::ops::RangeInclusive<i64>) -> Self {
        Self::Range(Range::new(*v.start(), *v.end()))
    }
}
