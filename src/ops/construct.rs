//! Domain-tagged matrix builders
//!
//! Extents may be given as any numeric scalar; they are converted with the
//! truncating integer rule. Both extents must convert to non-negative
//! integers.

use super::dispatch::is_scalar;
use crate::dtype::Complex;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::variant::Variant;

fn extent(arg: &'static str, value: Variant) -> Result<usize> {
    if !is_scalar(&value) {
        return Err(Error::type_mismatch(arg, value.value_type()));
    }
    let n = value.try_to_integer()?;
    usize::try_from(n)
        .map_err(|_| Error::invalid_parameter(arg, format!("extent {n} is negative")))
}

fn extents(rows: impl Into<Variant>, cols: impl Into<Variant>) -> Result<(usize, usize)> {
    Ok((extent("rows", rows.into())?, extent("cols", cols.into())?))
}

macro_rules! builders {
    ($($suffix:ident => $t:ty),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("`rows x cols` ", stringify!($suffix), " Kronecker delta")]
                pub fn [<identity_ $suffix>](
                    rows: impl Into<Variant>,
                    cols: impl Into<Variant>,
                ) -> Result<Matrix<$t>> {
                    let (rows, cols) = extents(rows, cols)?;
                    Matrix::identity_rect(rows, cols)
                }

                #[doc = concat!("`rows x cols` ", stringify!($suffix), " matrix of zeros")]
                pub fn [<zero_ $suffix>](
                    rows: impl Into<Variant>,
                    cols: impl Into<Variant>,
                ) -> Result<Matrix<$t>> {
                    let (rows, cols) = extents(rows, cols)?;
                    Matrix::zero(rows, cols)
                }

                #[doc = concat!("`rows x cols` ", stringify!($suffix), " matrix of ones")]
                pub fn [<ones_ $suffix>](
                    rows: impl Into<Variant>,
                    cols: impl Into<Variant>,
                ) -> Result<Matrix<$t>> {
                    let (rows, cols) = extents(rows, cols)?;
                    Matrix::ones(rows, cols)
                }
            )*
        }
    };
}

builders!(
    boolean => bool,
    integer => i64,
    real => f64,
    complex => Complex,
);
