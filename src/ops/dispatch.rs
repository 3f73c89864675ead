//! Runtime domain dispatch for the free-function façade
//!
//! Every façade function follows the same steps: read the tag of each
//! argument, compute the join of their domains, promote every argument to
//! that domain and call the typed matrix method. The macros below bind a
//! type alias to the chosen domain so the typed body is written once.

use crate::dtype::{DType, promote};
use crate::error::{Error, Result};
use crate::variant::Variant;

/// Macro for runtime dtype dispatch to typed operations.
///
/// Takes a `DType` value and executes a code block with `T` bound to the
/// corresponding Rust type.
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block) => {
        match $dtype {
            $crate::dtype::DType::Boolean => {
                type $T = bool;
                $body
            }
            $crate::dtype::DType::Integer => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::Real => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::Complex => {
                type $T = $crate::dtype::Complex;
                $body
            }
        }
    };
}

/// Dispatch over the domains the linear-algebra kernels accept.
///
/// Boolean and integer domains run as real.
#[macro_export]
macro_rules! dispatch_linalg {
    ($dtype:expr, $T:ident => $body:block) => {
        match $dtype {
            $crate::dtype::DType::Complex => {
                type $T = $crate::dtype::Complex;
                $body
            }
            _ => {
                type $T = f64;
                $body
            }
        }
    };
}

/// Domain of a numeric scalar or matrix argument
pub(crate) fn operand_dtype(op: &'static str, value: &Variant) -> Result<DType> {
    value
        .dtype()
        .ok_or_else(|| Error::type_mismatch(op, value.value_type()))
}

/// Join of the domains of two arguments
pub(crate) fn join(op: &'static str, a: &Variant, b: &Variant) -> Result<DType> {
    Ok(promote(operand_dtype(op, a)?, operand_dtype(op, b)?))
}

/// Domain of a linear-algebra argument, raised to at least real
pub(crate) fn linalg_dtype(op: &'static str, value: &Variant) -> Result<DType> {
    Ok(promote(operand_dtype(op, value)?, DType::Real))
}

/// True for the four scalar tags
pub(crate) fn is_scalar(value: &Variant) -> bool {
    value.value_type().is_scalar()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::Set;
    use crate::matrix::MatrixInteger;

    #[test]
    fn test_join() {
        let a = Variant::from(MatrixInteger::identity(2).unwrap());
        assert_eq!(join("add", &a, &Variant::Real(1.0)).unwrap(), DType::Real);
        assert_eq!(
            join("add", &Variant::Boolean(true), &a).unwrap(),
            DType::Integer
        );
        let err = join("add", &a, &Variant::Set(Set::from([1]))).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidParameterValue);
    }

    #[test]
    fn test_linalg_dtype() {
        assert_eq!(
            linalg_dtype("inverse", &Variant::Integer(1)).unwrap(),
            DType::Real
        );
        assert_eq!(
            linalg_dtype("inverse", &Variant::Complex(crate::dtype::Complex::I)).unwrap(),
            DType::Complex
        );
    }

    #[test]
    fn test_dispatch_binds_type() {
        fn size(dtype: DType) -> usize {
            dispatch_dtype!(dtype, T => { std::mem::size_of::<T>() })
        }
        assert_eq!(size(DType::Integer), 8);
        assert_eq!(size(DType::Complex), 16);
    }
}
