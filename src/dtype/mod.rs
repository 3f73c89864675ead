//! Scalar domains of numval matrices
//!
//! This module provides the `DType` enum naming the four scalar domains,
//! the promotion lattice between them, and the conversion primitives used to
//! move values up (losslessly) or down (explicitly, possibly failing) that
//! lattice.

pub mod complex;
mod convert;
mod element;
mod promotion;

pub use complex::Complex;
pub use convert::{Narrowing, RoundingMode, to_boolean, to_complex, to_index, to_integer, to_real};
pub use element::{Arithmetic, Element, Numeric, complex_order};
pub use promotion::{PromoteTo, can_cast_safely, promote};

use std::fmt;

/// Scalar domains supported by numval matrices
///
/// The discriminants double as the rank in the promotion lattice
/// `Boolean ≺ Integer ≺ Real ≺ Complex`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DType {
    /// `bool`
    Boolean = 0,
    /// `i64`
    Integer = 1,
    /// `f64`
    Real = 2,
    /// [`Complex`]
    Complex = 3,
}

impl DType {
    /// Position in the promotion lattice (higher wins)
    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Size of one dense element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::Boolean => 1,
            Self::Integer | Self::Real => 8,
            Self::Complex => 16,
        }
    }

    /// Returns true for the real and complex domains
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Real | Self::Complex)
    }

    /// Short name used in diagnostics
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        assert!(DType::Boolean < DType::Integer);
        assert!(DType::Integer < DType::Real);
        assert!(DType::Real < DType::Complex);
    }

    #[test]
    fn test_sizes() {
        assert_eq!(DType::Complex.size_in_bytes(), 16);
        assert_eq!(DType::Boolean.size_in_bytes(), 1);
    }
}
