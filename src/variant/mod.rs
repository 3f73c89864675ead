//! Runtime-typed values
//!
//! A [`Variant`] holds any value the library produces: a scalar of one of
//! the four domains, an index [`Set`] or [`Tuple`], or a matrix. The
//! free-function façade in [`ops`](crate::ops) takes variants, inspects
//! their [`ValueType`] and dispatches to the typed implementation.

mod element;
mod ordering;

pub use element::VariantElement;
pub use ordering::implicit_ordering;

use crate::collections::{Set, Tuple};
use crate::dtype::{Complex, DType, Element};
use crate::error::{Error, Result};
use crate::matrix::{Matrix, MatrixBoolean, MatrixComplex, MatrixInteger, MatrixReal};
use std::fmt;

/// Tag of a [`Variant`]
///
/// `ValueType::Variant` names the tagged union itself in signatures and
/// error messages; no value ever reports it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    /// No value
    None,
    /// `bool`
    Boolean,
    /// `i64`
    Integer,
    /// `f64`
    Real,
    /// [`Complex`]
    Complex,
    /// [`Set`]
    Set,
    /// [`Tuple`]
    Tuple,
    /// [`MatrixBoolean`]
    MatrixBoolean,
    /// [`MatrixInteger`]
    MatrixInteger,
    /// [`MatrixReal`]
    MatrixReal,
    /// [`MatrixComplex`]
    MatrixComplex,
    /// The tagged union itself
    Variant,
}

impl ValueType {
    /// Scalar domain of a numeric scalar or matrix tag
    pub const fn dtype(self) -> Option<DType> {
        match self {
            Self::Boolean | Self::MatrixBoolean => Some(DType::Boolean),
            Self::Integer | Self::MatrixInteger => Some(DType::Integer),
            Self::Real | Self::MatrixReal => Some(DType::Real),
            Self::Complex | Self::MatrixComplex => Some(DType::Complex),
            _ => None,
        }
    }

    /// True for the four matrix tags
    pub const fn is_matrix(self) -> bool {
        matches!(
            self,
            Self::MatrixBoolean | Self::MatrixInteger | Self::MatrixReal | Self::MatrixComplex
        )
    }

    /// True for the four numeric scalar tags
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::Boolean | Self::Integer | Self::Real | Self::Complex)
    }

    /// Scalar tag of a domain
    pub const fn scalar(dtype: DType) -> Self {
        match dtype {
            DType::Boolean => Self::Boolean,
            DType::Integer => Self::Integer,
            DType::Real => Self::Real,
            DType::Complex => Self::Complex,
        }
    }

    /// Matrix tag of a domain
    pub const fn matrix(dtype: DType) -> Self {
        match dtype {
            DType::Boolean => Self::MatrixBoolean,
            DType::Integer => Self::MatrixInteger,
            DType::Real => Self::MatrixReal,
            DType::Complex => Self::MatrixComplex,
        }
    }

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Complex => "complex",
            Self::Set => "set",
            Self::Tuple => "tuple",
            Self::MatrixBoolean => "boolean matrix",
            Self::MatrixInteger => "integer matrix",
            Self::MatrixReal => "real matrix",
            Self::MatrixComplex => "complex matrix",
            Self::Variant => "variant",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value of runtime-chosen type
#[derive(Clone, Debug, Default)]
pub enum Variant {
    /// No value
    #[default]
    None,
    /// Boolean scalar
    Boolean(bool),
    /// Integer scalar
    Integer(i64),
    /// Real scalar
    Real(f64),
    /// Complex scalar
    Complex(Complex),
    /// Ordered set of integers
    Set(Set),
    /// Sequence of integers
    Tuple(Tuple),
    /// Boolean matrix
    MatrixBoolean(MatrixBoolean),
    /// Integer matrix
    MatrixInteger(MatrixInteger),
    /// Real matrix
    MatrixReal(MatrixReal),
    /// Complex matrix
    MatrixComplex(MatrixComplex),
}

macro_rules! impl_from {
    ($($t:ty => $tag:ident),* $(,)?) => {
        $(
            impl From<$t> for Variant {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::$tag(value)
                }
            }

            impl From<&$t> for Variant {
                #[inline]
                fn from(value: &$t) -> Self {
                    Self::$tag(value.clone())
                }
            }
        )*
    };
}

impl_from!(
    bool => Boolean,
    i64 => Integer,
    f64 => Real,
    Complex => Complex,
    Set => Set,
    Tuple => Tuple,
    MatrixBoolean => MatrixBoolean,
    MatrixInteger => MatrixInteger,
    MatrixReal => MatrixReal,
    MatrixComplex => MatrixComplex,
);

impl From<i32> for Variant {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<&Variant> for Variant {
    #[inline]
    fn from(value: &Variant) -> Self {
        value.clone()
    }
}

impl Variant {
    /// Tag of the held value; stable across copies
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::None => ValueType::None,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Integer(_) => ValueType::Integer,
            Self::Real(_) => ValueType::Real,
            Self::Complex(_) => ValueType::Complex,
            Self::Set(_) => ValueType::Set,
            Self::Tuple(_) => ValueType::Tuple,
            Self::MatrixBoolean(_) => ValueType::MatrixBoolean,
            Self::MatrixInteger(_) => ValueType::MatrixInteger,
            Self::MatrixReal(_) => ValueType::MatrixReal,
            Self::MatrixComplex(_) => ValueType::MatrixComplex,
        }
    }

    /// Scalar domain of a numeric scalar or matrix
    pub fn dtype(&self) -> Option<DType> {
        self.value_type().dtype()
    }

    /// True for [`Variant::None`]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Numeric scalar promoted to the complex domain
    pub(crate) fn scalar_complex(&self) -> Option<Complex> {
        match *self {
            Self::Boolean(v) => Some(v.to_complex()),
            Self::Integer(v) => Some(v.to_complex()),
            Self::Real(v) => Some(v.to_complex()),
            Self::Complex(v) => Some(v),
            _ => None,
        }
    }

    /// Convert to a scalar of domain `T`
    ///
    /// A `1 x 1` matrix yields its only coefficient. Narrowing conversions
    /// truncate towards zero and fail on values they cannot represent.
    pub fn try_to_scalar<T: VariantElement>(&self) -> Result<T> {
        T::from_variant(self)
    }

    /// Convert to a matrix of domain `T`; a scalar becomes a `1 x 1` matrix
    pub fn try_to_matrix<T: VariantElement>(&self) -> Result<Matrix<T>> {
        T::matrix_from_variant(self)
    }

    /// Fallible boolean extraction
    pub fn try_to_boolean(&self) -> Result<bool> {
        self.try_to_scalar()
    }

    /// Fallible integer extraction
    pub fn try_to_integer(&self) -> Result<i64> {
        self.try_to_scalar()
    }

    /// Fallible real extraction
    pub fn try_to_real(&self) -> Result<f64> {
        self.try_to_scalar()
    }

    /// Fallible complex extraction
    pub fn try_to_complex(&self) -> Result<Complex> {
        self.try_to_scalar()
    }

    /// Fallible boolean matrix extraction
    pub fn try_to_matrix_boolean(&self) -> Result<MatrixBoolean> {
        self.try_to_matrix()
    }

    /// Fallible integer matrix extraction
    pub fn try_to_matrix_integer(&self) -> Result<MatrixInteger> {
        self.try_to_matrix()
    }

    /// Fallible real matrix extraction
    pub fn try_to_matrix_real(&self) -> Result<MatrixReal> {
        self.try_to_matrix()
    }

    /// Fallible complex matrix extraction
    pub fn try_to_matrix_complex(&self) -> Result<MatrixComplex> {
        self.try_to_matrix()
    }

    /// `x ≠ 0`; `false` when there is no numeric value
    pub fn to_boolean(&self) -> bool {
        self.try_to_boolean().unwrap_or_default()
    }

    /// Truncated integer; zero when the conversion is impossible
    pub fn to_integer(&self) -> i64 {
        self.try_to_integer().unwrap_or_default()
    }

    /// Real value; NaN when the conversion is impossible
    pub fn to_real(&self) -> f64 {
        self.try_to_real().unwrap_or(f64::NAN)
    }

    /// Complex value; NaN when the conversion is impossible
    pub fn to_complex(&self) -> Complex {
        self.try_to_complex().unwrap_or(Complex::NAN)
    }

    /// Boolean matrix; empty when the conversion is impossible
    pub fn to_matrix_boolean(&self) -> MatrixBoolean {
        self.try_to_matrix_boolean().unwrap_or_else(|_| Matrix::empty())
    }

    /// Integer matrix; empty when the conversion is impossible
    pub fn to_matrix_integer(&self) -> MatrixInteger {
        self.try_to_matrix_integer().unwrap_or_else(|_| Matrix::empty())
    }

    /// Real matrix; empty when the conversion is impossible
    pub fn to_matrix_real(&self) -> MatrixReal {
        self.try_to_matrix_real().unwrap_or_else(|_| Matrix::empty())
    }

    /// Complex matrix; empty when the conversion is impossible
    pub fn to_matrix_complex(&self) -> MatrixComplex {
        self.try_to_matrix_complex().unwrap_or_else(|_| Matrix::empty())
    }
}

/// The only coefficient of a `1 x 1` matrix
pub(crate) fn single_coefficient<T: Element>(m: &Matrix<T>) -> Result<T> {
    if m.shape() != (1, 1) {
        let (rows, cols) = m.shape();
        return Err(Error::invalid_parameter(
            "value",
            format!("a {rows}x{cols} matrix is not a scalar"),
        ));
    }
    m.at(1, 1)
}

impl PartialEq for Variant {
    /// Values compare after promotion to the join of their domains
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (
                Self::Boolean(_) | Self::Integer(_),
                Self::Boolean(_) | Self::Integer(_),
            ) => self.to_integer() == other.to_integer(),
            _ => match (self.scalar_complex(), other.scalar_complex()) {
                (Some(a), Some(b)) => a == b,
                (None, None) => matrices_equal(self, other),
                _ => false,
            },
        }
    }
}

fn matrices_equal(a: &Variant, b: &Variant) -> bool {
    let (Some(da), Some(db)) = (a.dtype(), b.dtype()) else {
        return false;
    };
    let join = crate::dtype::promote(da, db);
    crate::dispatch_dtype!(join, T => {
        match (a.try_to_matrix::<T>(), b.try_to_matrix::<T>()) {
            (Ok(x), Ok(y)) => x == y,
            _ => false,
        }
    })
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Complex(v) => write!(f, "{v}"),
            Self::Set(v) => write!(f, "{v}"),
            Self::Tuple(v) => write!(f, "{v}"),
            Self::MatrixBoolean(m) => write!(f, "{m}"),
            Self::MatrixInteger(m) => write!(f, "{m}"),
            Self::MatrixReal(m) => write!(f, "{m}"),
            Self::MatrixComplex(m) => write!(f, "{m}"),
        }
    }
}
