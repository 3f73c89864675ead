//! Structural operations and predicates across domains

use super::dispatch::{join, operand_dtype};
use crate::error::Result;
use crate::variant::{Variant, VariantElement};

macro_rules! unary_structural {
    ($($(#[$doc:meta])* $name:ident => $method:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(a: impl Into<Variant>) -> Result<Variant> {
                let a = a.into();
                let dtype = operand_dtype(stringify!($name), &a)?;
                crate::dispatch_dtype!(dtype, T => {
                    let m = a.try_to_matrix::<T>()?;
                    Ok(T::matrix_into_variant(m.$method()?))
                })
            }
        )*
    };
}

unary_structural! {
    /// Complex conjugate; a copy of the handle outside the complex domain
    conj => conj;
    /// Conjugate transpose
    adjoint => adjoint;
    /// Columns in reverse order
    column_reverse => column_reverse;
    /// Rows in reverse order
    row_reverse => row_reverse;
}

/// Transpose; O(1)
pub fn transpose(a: impl Into<Variant>) -> Result<Variant> {
    let a = a.into();
    let dtype = operand_dtype("transpose", &a)?;
    crate::dispatch_dtype!(dtype, T => {
        Ok(T::matrix_into_variant(a.try_to_matrix::<T>()?.transpose()))
    })
}

/// `[a | b]` in the join domain
pub fn combine_left_to_right(a: impl Into<Variant>, b: impl Into<Variant>) -> Result<Variant> {
    let (a, b) = (a.into(), b.into());
    let dtype = join("combine_left_to_right", &a, &b)?;
    crate::dispatch_dtype!(dtype, T => {
        let x = a.try_to_matrix::<T>()?;
        let y = b.try_to_matrix::<T>()?;
        Ok(T::matrix_into_variant(x.combine_left_to_right(&y)?))
    })
}

/// `[a; b]` in the join domain
pub fn combine_top_to_bottom(a: impl Into<Variant>, b: impl Into<Variant>) -> Result<Variant> {
    let (a, b) = (a.into(), b.into());
    let dtype = join("combine_top_to_bottom", &a, &b)?;
    crate::dispatch_dtype!(dtype, T => {
        let x = a.try_to_matrix::<T>()?;
        let y = b.try_to_matrix::<T>()?;
        Ok(T::matrix_into_variant(x.combine_top_to_bottom(&y)?))
    })
}

/// `(rows, cols)` of a matrix; `(1, 1)` for a scalar
pub fn shape(a: impl Into<Variant>) -> Result<(usize, usize)> {
    let a = a.into();
    let dtype = operand_dtype("shape", &a)?;
    crate::dispatch_dtype!(dtype, T => {
        Ok(a.try_to_matrix::<T>()?.shape())
    })
}

macro_rules! predicate {
    ($($(#[$doc:meta])* $name:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(a: impl Into<Variant>, tol: f64) -> Result<bool> {
                let a = a.into();
                let dtype = operand_dtype(stringify!($name), &a)?;
                crate::dispatch_dtype!(dtype, T => {
                    Ok(a.try_to_matrix::<T>()?.$name(tol))
                })
            }
        )*
    };
}

predicate! {
    /// `a(i, j) == a(j, i)` within a relative tolerance
    is_symmetric;
    /// `a(i, j) == conj(a(j, i))` within a relative tolerance
    is_hermitian;
    /// `a(i, j) == −a(j, i)` within a relative tolerance
    is_skew_symmetric;
    /// `a(i, j) == −conj(a(j, i))` within a relative tolerance
    is_skew_hermitian;
}

/// `A·Aᴴ == Aᴴ·A` within a relative tolerance
pub fn is_normal(a: impl Into<Variant>, tol: f64) -> Result<bool> {
    let a = a.into();
    let dtype = operand_dtype("is_normal", &a)?;
    crate::dispatch_dtype!(dtype, T => {
        a.try_to_matrix::<T>()?.is_normal(tol)
    })
}
