//! Explicit conversions down the promotion lattice
//!
//! Widening conversions are infallible and live in [`super::PromoteTo`].
//! Narrowing conversions are total functions returning `Result`: they either
//! produce the converted value or an `InvalidParameterValue` error.

use super::{Complex, Element};
use crate::error::{Error, Result};
use num_traits::ToPrimitive;

/// How a real value is turned into an integer
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round towards zero
    #[default]
    Truncate,
    /// Round towards negative infinity
    Floor,
    /// Round towards positive infinity
    Ceil,
    /// Round to the nearest integer, halfway cases away from zero
    Nearest,
}

impl RoundingMode {
    /// Apply the rounding rule, keeping the value real
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Truncate => value.trunc(),
            Self::Floor => value.floor(),
            Self::Ceil => value.ceil(),
            Self::Nearest => value.round(),
        }
    }
}

/// Scalars that can be narrowed to the integer and real domains
pub trait Narrowing: Element {
    /// Convert to an integer using the given rounding rule
    ///
    /// Fails if the value is not finite, is out of `i64` range, or has a
    /// non-zero imaginary part.
    fn to_integer_with(self, mode: RoundingMode) -> Result<i64>;

    /// Convert to a real; fails if the value has a non-zero imaginary part
    fn to_real(self) -> Result<f64>;
}

impl Narrowing for bool {
    #[inline]
    fn to_integer_with(self, _mode: RoundingMode) -> Result<i64> {
        Ok(self as i64)
    }

    #[inline]
    fn to_real(self) -> Result<f64> {
        Ok(if self { 1.0 } else { 0.0 })
    }
}

impl Narrowing for i64 {
    #[inline]
    fn to_integer_with(self, _mode: RoundingMode) -> Result<i64> {
        Ok(self)
    }

    #[inline]
    fn to_real(self) -> Result<f64> {
        Ok(self as f64)
    }
}

impl Narrowing for f64 {
    fn to_integer_with(self, mode: RoundingMode) -> Result<i64> {
        mode.apply(self).to_i64().ok_or_else(|| {
            Error::invalid_parameter("value", format!("{self} is not representable as an integer"))
        })
    }

    #[inline]
    fn to_real(self) -> Result<f64> {
        Ok(self)
    }
}

impl Narrowing for Complex {
    fn to_integer_with(self, mode: RoundingMode) -> Result<i64> {
        self.to_real()?.to_integer_with(mode)
    }

    fn to_real(self) -> Result<f64> {
        if self.im == 0.0 {
            Ok(self.re)
        } else {
            Err(Error::invalid_parameter(
                "value",
                format!("{self} has a non-zero imaginary part"),
            ))
        }
    }
}

/// `x ≠ 0`
#[inline]
pub fn to_boolean<T: Element>(x: T) -> bool {
    !x.is_zero()
}

/// Convert to an integer, truncating towards zero
#[inline]
pub fn to_integer<T: Narrowing>(x: T) -> Result<i64> {
    x.to_integer_with(RoundingMode::Truncate)
}

/// Convert to a real
#[inline]
pub fn to_real<T: Narrowing>(x: T) -> Result<f64> {
    x.to_real()
}

/// Convert to a complex; never fails
#[inline]
pub fn to_complex<T: Element>(x: T) -> Complex {
    x.to_complex()
}

/// Convert an index-like value to a positive one-based index
///
/// Real and complex values are rounded to the nearest integer; a complex
/// value must have a zero imaginary part.
pub fn to_index<T: Narrowing>(x: T) -> Result<usize> {
    let value = x
        .to_integer_with(RoundingMode::Nearest)
        .map_err(|_| Error::invalid_index_value(format!("{x} is not an integer index")))?;
    if value < 1 {
        return Err(Error::invalid_index_value(format!(
            "index {value} is not a positive integer"
        )));
    }
    value
        .to_usize()
        .ok_or_else(|| Error::invalid_index_value(format!("index {value} is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_to_boolean() {
        assert!(to_boolean(3i64));
        assert!(!to_boolean(0.0f64));
        assert!(to_boolean(Complex::new(0.0, 1.0)));
    }

    #[test]
    fn test_to_integer_truncates() {
        assert_eq!(to_integer(2.7f64).unwrap(), 2);
        assert_eq!(to_integer(-2.7f64).unwrap(), -2);
        assert_eq!(2.5f64.to_integer_with(RoundingMode::Nearest).unwrap(), 3);
        assert_eq!((-2.5f64).to_integer_with(RoundingMode::Floor).unwrap(), -3);
        assert_eq!(2.1f64.to_integer_with(RoundingMode::Ceil).unwrap(), 3);
    }

    #[test]
    fn test_to_integer_failures() {
        for bad in [f64::NAN, f64::INFINITY, 1e300] {
            let err = to_integer(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameterValue);
        }
        assert!(to_integer(Complex::new(1.0, 1.0)).is_err());
        assert_eq!(to_integer(Complex::new(4.0, 0.0)).unwrap(), 4);
    }

    #[test]
    fn test_to_real() {
        assert_eq!(to_real(true).unwrap(), 1.0);
        assert!(to_real(Complex::new(1.0, -1.0)).is_err());
    }

    #[test]
    fn test_to_index() {
        assert_eq!(to_index(1.4f64).unwrap(), 1);
        assert_eq!(to_index(Complex::new(2.6, 0.0)).unwrap(), 3);
        assert_eq!(
            to_index(Complex::new(2.0, 0.5)).unwrap_err().kind(),
            ErrorKind::InvalidIndex
        );
        assert_eq!(to_index(0i64).unwrap_err().kind(), ErrorKind::InvalidIndex);
        assert_eq!(to_index(0.3f64).unwrap_err().kind(), ErrorKind::InvalidIndex);
    }
}
