//! Arithmetic across domains
//!
//! Results take the join of the operand domains. Two scalars give a
//! scalar; any matrix operand gives a matrix, with scalars taking part as
//! `1 x 1` matrices (or as scale factors for `multiply` and `divide`).

use super::dispatch::{is_scalar, join, operand_dtype};
use crate::dtype::{Arithmetic, Complex, DType, Numeric, promote};
use crate::error::{Error, Result};
use crate::variant::{Variant, VariantElement};

/// `a + b`
pub fn add(a: impl Into<Variant>, b: impl Into<Variant>) -> Result<Variant> {
    let (a, b) = (a.into(), b.into());
    let dtype = join("add", &a, &b)?;
    crate::dispatch_dtype!(dtype, T => {
        if is_scalar(&a) && is_scalar(&b) {
            let x: T = a.try_to_scalar()?;
            let y: T = b.try_to_scalar()?;
            return Ok(x.plus(y).into_variant());
        }
        let x = a.try_to_matrix::<T>()?;
        let y = b.try_to_matrix::<T>()?;
        Ok(T::matrix_into_variant(x.add(&y)?))
    })
}

/// `a − b`
pub fn subtract(a: impl Into<Variant>, b: impl Into<Variant>) -> Result<Variant> {
    let (a, b) = (a.into(), b.into());
    let dtype = join("subtract", &a, &b)?;
    crate::dispatch_dtype!(dtype, T => {
        if is_scalar(&a) && is_scalar(&b) {
            let x: T = a.try_to_scalar()?;
            let y: T = b.try_to_scalar()?;
            return Ok(x.minus(y).into_variant());
        }
        let x = a.try_to_matrix::<T>()?;
        let y = b.try_to_matrix::<T>()?;
        Ok(T::matrix_into_variant(x.sub(&y)?))
    })
}

/// `a · b`: scalar product, scaling, or matrix product
pub fn multiply(a: impl Into<Variant>, b: impl Into<Variant>) -> Result<Variant> {
    let (a, b) = (a.into(), b.into());
    let dtype = join("multiply", &a, &b)?;
    crate::dispatch_dtype!(dtype, T => {
        match (is_scalar(&a), is_scalar(&b)) {
            (true, true) => {
                let x: T = a.try_to_scalar()?;
                let y: T = b.try_to_scalar()?;
                Ok(x.times(y).into_variant())
            }
            (true, false) => {
                let s: T = a.try_to_scalar()?;
                Ok(T::matrix_into_variant(b.try_to_matrix::<T>()?.scale(s)?))
            }
            (false, true) => {
                let s: T = b.try_to_scalar()?;
                Ok(T::matrix_into_variant(a.try_to_matrix::<T>()?.scale(s)?))
            }
            (false, false) => {
                let x = a.try_to_matrix::<T>()?;
                let y = b.try_to_matrix::<T>()?;
                Ok(T::matrix_into_variant(x.matmul(&y)?))
            }
        }
    })
}

/// `a / b` with a scalar divisor
///
/// Boolean operands divide as integers; integer division truncates towards
/// zero and rejects a zero divisor.
pub fn divide(a: impl Into<Variant>, b: impl Into<Variant>) -> Result<Variant> {
    let (a, b) = (a.into(), b.into());
    if !is_scalar(&b) {
        return Err(Error::invalid_parameter(
            "divisor",
            format!("cannot divide by a {}", b.value_type()),
        ));
    }
    match promote(join("divide", &a, &b)?, DType::Integer) {
        DType::Complex => divide_as::<Complex>(&a, &b),
        DType::Real => divide_as::<f64>(&a, &b),
        _ => divide_as::<i64>(&a, &b),
    }
}

fn divide_as<T: VariantElement + Numeric>(a: &Variant, b: &Variant) -> Result<Variant> {
    let divisor: T = b.try_to_scalar()?;
    if is_scalar(a) {
        let x: T = a.try_to_scalar()?;
        return x
            .checked_div(divisor)
            .map(T::into_variant)
            .ok_or_else(|| Error::invalid_parameter("divisor", "integer division by zero"));
    }
    Ok(T::matrix_into_variant(
        a.try_to_matrix::<T>()?.div_scalar(divisor)?,
    ))
}

/// `−a`; the identity on booleans
pub fn negate(a: impl Into<Variant>) -> Result<Variant> {
    let a = a.into();
    let dtype = operand_dtype("negate", &a)?;
    crate::dispatch_dtype!(dtype, T => {
        if is_scalar(&a) {
            let x: T = a.try_to_scalar()?;
            return Ok(x.negate().into_variant());
        }
        Ok(T::matrix_into_variant(a.try_to_matrix::<T>()?.negate()?))
    })
}

/// Element-wise product of equal-shape matrices
pub fn hadamard(a: impl Into<Variant>, b: impl Into<Variant>) -> Result<Variant> {
    let (a, b) = (a.into(), b.into());
    let dtype = join("hadamard", &a, &b)?;
    crate::dispatch_dtype!(dtype, T => {
        let x = a.try_to_matrix::<T>()?;
        let y = b.try_to_matrix::<T>()?;
        Ok(T::matrix_into_variant(x.hadamard(&y)?))
    })
}

/// Kronecker (tensor) product
pub fn kronecker(a: impl Into<Variant>, b: impl Into<Variant>) -> Result<Variant> {
    let (a, b) = (a.into(), b.into());
    let dtype = join("kronecker", &a, &b)?;
    crate::dispatch_dtype!(dtype, T => {
        let x = a.try_to_matrix::<T>()?;
        let y = b.try_to_matrix::<T>()?;
        Ok(T::matrix_into_variant(x.kronecker(&y)?))
    })
}

/// Sum of the diagonal, in the domain of the argument
pub fn trace(a: impl Into<Variant>) -> Result<Variant> {
    let a = a.into();
    let dtype = operand_dtype("trace", &a)?;
    crate::dispatch_dtype!(dtype, T => {
        Ok(a.try_to_matrix::<T>()?.trace().into_variant())
    })
}
