//! Conversions between [`Variant`] and the typed scalar domains

use super::{ValueType, Variant, single_coefficient};
use crate::dtype::{Complex, Narrowing, RoundingMode};
use crate::error::{Error, Result};
use crate::matrix::{Matrix, MatrixBoolean, MatrixComplex, MatrixInteger, MatrixReal};

/// Scalar domains a [`Variant`] can be converted to and from
///
/// Widening conversions are lossless. Narrowing conversions truncate
/// towards zero (integer), fail on a non-zero imaginary part (integer and
/// real) or test `x ≠ 0` (boolean).
pub trait VariantElement: Narrowing {
    /// Tag of a scalar of this domain
    const SCALAR_TYPE: ValueType;

    /// Tag of a matrix of this domain
    const MATRIX_TYPE: ValueType;

    /// Convert an integer scalar
    fn from_integer_value(value: i64) -> Result<Self>;

    /// Convert a real scalar
    fn from_real_value(value: f64) -> Result<Self>;

    /// Convert a complex scalar
    fn from_complex_value(value: Complex) -> Result<Self>;

    /// Convert a boolean matrix
    fn from_boolean_matrix(m: &MatrixBoolean) -> Result<Matrix<Self>>;

    /// Convert an integer matrix
    fn from_integer_matrix(m: &MatrixInteger) -> Result<Matrix<Self>>;

    /// Convert a real matrix
    fn from_real_matrix(m: &MatrixReal) -> Result<Matrix<Self>>;

    /// Convert a complex matrix
    fn from_complex_matrix(m: &MatrixComplex) -> Result<Matrix<Self>>;

    /// Wrap a scalar
    fn into_variant(self) -> Variant;

    /// Wrap a matrix
    fn matrix_into_variant(m: Matrix<Self>) -> Variant;

    /// Scalar of this domain from any numeric variant
    fn from_variant(variant: &Variant) -> Result<Self> {
        match variant {
            Variant::Boolean(v) => Ok(Self::from_bool(*v)),
            Variant::Integer(v) => Self::from_integer_value(*v),
            Variant::Real(v) => Self::from_real_value(*v),
            Variant::Complex(v) => Self::from_complex_value(*v),
            Variant::MatrixBoolean(m) => Ok(Self::from_bool(single_coefficient(m)?)),
            Variant::MatrixInteger(m) => Self::from_integer_value(single_coefficient(m)?),
            Variant::MatrixReal(m) => Self::from_real_value(single_coefficient(m)?),
            Variant::MatrixComplex(m) => Self::from_complex_value(single_coefficient(m)?),
            other => Err(Error::type_mismatch("scalar conversion", other.value_type())),
        }
    }

    /// Matrix of this domain from any numeric variant; a scalar becomes a
    /// `1 x 1` matrix
    fn matrix_from_variant(variant: &Variant) -> Result<Matrix<Self>> {
        match variant {
            Variant::MatrixBoolean(m) => Self::from_boolean_matrix(m),
            Variant::MatrixInteger(m) => Self::from_integer_matrix(m),
            Variant::MatrixReal(m) => Self::from_real_matrix(m),
            Variant::MatrixComplex(m) => Self::from_complex_matrix(m),
            Variant::Boolean(_) | Variant::Integer(_) | Variant::Real(_) | Variant::Complex(_) => {
                let value = Self::from_variant(variant)?;
                Matrix::from_column_major_vec(1, 1, vec![value])
            }
            other => Err(Error::type_mismatch("matrix conversion", other.value_type())),
        }
    }
}

impl VariantElement for bool {
    const SCALAR_TYPE: ValueType = ValueType::Boolean;
    const MATRIX_TYPE: ValueType = ValueType::MatrixBoolean;

    fn from_integer_value(value: i64) -> Result<Self> {
        Ok(value != 0)
    }

    fn from_real_value(value: f64) -> Result<Self> {
        Ok(value != 0.0)
    }

    fn from_complex_value(value: Complex) -> Result<Self> {
        Ok(value != Complex::ZERO)
    }

    fn from_boolean_matrix(m: &MatrixBoolean) -> Result<Matrix<Self>> {
        Ok(m.clone())
    }

    fn from_integer_matrix(m: &MatrixInteger) -> Result<Matrix<Self>> {
        m.to_boolean_matrix()
    }

    fn from_real_matrix(m: &MatrixReal) -> Result<Matrix<Self>> {
        m.to_boolean_matrix()
    }

    fn from_complex_matrix(m: &MatrixComplex) -> Result<Matrix<Self>> {
        m.to_boolean_matrix()
    }

    fn into_variant(self) -> Variant {
        Variant::Boolean(self)
    }

    fn matrix_into_variant(m: Matrix<Self>) -> Variant {
        Variant::MatrixBoolean(m)
    }
}

impl VariantElement for i64 {
    const SCALAR_TYPE: ValueType = ValueType::Integer;
    const MATRIX_TYPE: ValueType = ValueType::MatrixInteger;

    fn from_integer_value(value: i64) -> Result<Self> {
        Ok(value)
    }

    fn from_real_value(value: f64) -> Result<Self> {
        value.to_integer_with(RoundingMode::Truncate)
    }

    fn from_complex_value(value: Complex) -> Result<Self> {
        value.to_integer_with(RoundingMode::Truncate)
    }

    fn from_boolean_matrix(m: &MatrixBoolean) -> Result<Matrix<Self>> {
        m.promote()
    }

    fn from_integer_matrix(m: &MatrixInteger) -> Result<Matrix<Self>> {
        Ok(m.clone())
    }

    fn from_real_matrix(m: &MatrixReal) -> Result<Matrix<Self>> {
        m.to_integer_matrix(RoundingMode::Truncate)
    }

    fn from_complex_matrix(m: &MatrixComplex) -> Result<Matrix<Self>> {
        m.to_integer_matrix(RoundingMode::Truncate)
    }

    fn into_variant(self) -> Variant {
        Variant::Integer(self)
    }

    fn matrix_into_variant(m: Matrix<Self>) -> Variant {
        Variant::MatrixInteger(m)
    }
}

impl VariantElement for f64 {
    const SCALAR_TYPE: ValueType = ValueType::Real;
    const MATRIX_TYPE: ValueType = ValueType::MatrixReal;

    fn from_integer_value(value: i64) -> Result<Self> {
        Ok(value as f64)
    }

    fn from_real_value(value: f64) -> Result<Self> {
        Ok(value)
    }

    fn from_complex_value(value: Complex) -> Result<Self> {
        value.to_real()
    }

    fn from_boolean_matrix(m: &MatrixBoolean) -> Result<Matrix<Self>> {
        m.promote()
    }

    fn from_integer_matrix(m: &MatrixInteger) -> Result<Matrix<Self>> {
        m.promote()
    }

    fn from_real_matrix(m: &MatrixReal) -> Result<Matrix<Self>> {
        Ok(m.clone())
    }

    fn from_complex_matrix(m: &MatrixComplex) -> Result<Matrix<Self>> {
        m.to_real_matrix()
    }

    fn into_variant(self) -> Variant {
        Variant::Real(self)
    }

    fn matrix_into_variant(m: Matrix<Self>) -> Variant {
        Variant::MatrixReal(m)
    }
}

impl VariantElement for Complex {
    const SCALAR_TYPE: ValueType = ValueType::Complex;
    const MATRIX_TYPE: ValueType = ValueType::MatrixComplex;

    fn from_integer_value(value: i64) -> Result<Self> {
        Ok(Complex::from(value))
    }

    fn from_real_value(value: f64) -> Result<Self> {
        Ok(Complex::from(value))
    }

    fn from_complex_value(value: Complex) -> Result<Self> {
        Ok(value)
    }

    fn from_boolean_matrix(m: &MatrixBoolean) -> Result<Matrix<Self>> {
        m.promote()
    }

    fn from_integer_matrix(m: &MatrixInteger) -> Result<Matrix<Self>> {
        m.promote()
    }

    fn from_real_matrix(m: &MatrixReal) -> Result<Matrix<Self>> {
        m.promote()
    }

    fn from_complex_matrix(m: &MatrixComplex) -> Result<Matrix<Self>> {
        Ok(m.clone())
    }

    fn into_variant(self) -> Variant {
        Variant::Complex(self)
    }

    fn matrix_into_variant(m: Matrix<Self>) -> Variant {
        Variant::MatrixComplex(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_narrowing() {
        assert_eq!(i64::from_real_value(-3.7).unwrap(), -3);
        assert!(i64::from_real_value(f64::INFINITY).is_err());
        assert!(f64::from_complex_value(Complex::I).is_err());
        assert!(bool::from_real_value(0.5).unwrap());
        assert!(!bool::from_complex_value(Complex::ZERO).unwrap());
    }

    #[test]
    fn test_tags() {
        assert_eq!(<f64 as VariantElement>::MATRIX_TYPE, ValueType::MatrixReal);
        assert_eq!(Complex::I.into_variant().value_type(), ValueType::Complex);
        let m = MatrixInteger::identity(2).unwrap();
        assert_eq!(
            i64::matrix_into_variant(m).value_type(),
            ValueType::MatrixInteger
        );
    }

    #[test]
    fn test_scalar_promotes_to_single_cell_matrix() {
        let m = f64::matrix_from_variant(&Variant::Boolean(true)).unwrap();
        assert_eq!(m.shape(), (1, 1));
        assert_eq!(m.at(1, 1).unwrap(), 1.0);
        assert!(f64::matrix_from_variant(&Variant::None).is_err());
    }
}
